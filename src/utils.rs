/*
    Minor Planet Painter, heliocentric snapshots of the minor planet population
    Copyright (C) 2024 Minor Planet Painter contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

extern crate nalgebra as na;
use self::na::Matrix3;
use std::f64::consts::TAU;

/// Returns the provided angle bounded between 0.0 and 2π radians
pub fn between_0_tau(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Rotation of angle about the X axis, as a DCM (angle in radians)
pub fn r1(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation of angle about the Z axis, as a DCM (angle in radians)
pub fn r3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Returns the DCM from the perifocal-like frame whose X axis points along the argument `arg_rad`
/// (measured from the ascending node) into the ecliptic frame, given the node longitude and the
/// inclination, all in radians.
pub fn orbital_plane_to_ecliptic(raan_rad: f64, inc_rad: f64, arg_rad: f64) -> Matrix3<f64> {
    r3(-raan_rad) * r1(-inc_rad) * r3(-arg_rad)
}
