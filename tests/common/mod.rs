use yieldsim::catalog::{Star, StarCatalog};

pub fn sun_like(id: u64, mag: f64, ecl_lat: f64) -> Star {
    Star {
        id,
        ra: 290.0,
        dec: 44.5,
        ecl_lon: (id as f64 * 3.0) % 360.0,
        ecl_lat,
        mag,
        teff: 5800.0,
        radius: 1.0,
        mass: 1.0,
        dilution: 0.0,
        giant: false,
    }
}

pub fn m_dwarf(id: u64, mag: f64, ecl_lat: f64) -> Star {
    Star {
        id,
        ra: 120.0,
        dec: -10.0,
        ecl_lon: (id as f64 * 7.0) % 360.0,
        ecl_lat,
        mag,
        teff: 3300.0,
        radius: 0.3,
        mass: 0.3,
        dilution: 0.0,
        giant: false,
    }
}

/// Catalog of `n_fgk` Sun-like stars followed by `n_m` M dwarfs, all near the
/// ecliptic plane.
pub fn mixed_catalog(n_fgk: usize, n_m: usize) -> StarCatalog {
    let mut catalog: StarCatalog = (0..n_fgk)
        .map(|i| sun_like(i as u64, 10.0, 2.0))
        .collect();
    catalog.extend((0..n_m).map(|i| m_dwarf((n_fgk + i) as u64, 12.0, 2.0)));
    catalog
}
