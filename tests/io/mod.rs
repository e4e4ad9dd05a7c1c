mod config;
mod mpcorb;
mod packed_epoch;
