mod planets;
