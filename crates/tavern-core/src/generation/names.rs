//! Name generation utilities

use rand::Rng;

use crate::components::Name;

/// Generate a random patron name.
pub fn generate_name(rng: &mut impl Rng) -> Name {
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    let epithet = EPITHETS[rng.gen_range(0..EPITHETS.len())];
    Name::new(format!("{given} {epithet}"))
}

// Sample name lists - would be loaded from data files in production
static GIVEN_NAMES: &[&str] = &[
    "Alda", "Bram", "Cedric", "Dagna", "Edric", "Freya", "Gareth", "Hilda",
    "Ivo", "Jorun", "Kell", "Lysa", "Magnus", "Nessa", "Osric", "Petra",
    "Quill", "Rowan", "Sigrid", "Tobin", "Ulric", "Vera", "Wendel", "Yrsa",
];

static EPITHETS: &[&str] = &[
    "the Miller", "Ironhand", "of the Vale", "Thatcher", "the Quiet",
    "Longstride", "the Tanner", "Blackbrook", "the Fletcher", "Stoutheart",
    "of Oakhill", "the Cooper", "Greymane", "the Smith", "Underhill",
    "the Carter",
];
