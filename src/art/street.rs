/// Street-level sprites: trees, lamps, walk cycles, cars, furniture,
/// and the occasional animal visitor.

// ── Trees ──

pub const TREE_LEAFY: &[&str] = &[
    r#"  %%%  "#,
    r#" %%%%% "#,
    r#"  %%%  "#,
    r#"   |   "#,
];

pub const TREE_ROUND: &[&str] = &[
    r#" .@@. "#,
    r#"(@@@@@)"#,
    r#" '@@' "#,
    r#"  ||  "#,
];

pub const TREE_PINE: &[&str] = &[
    r#"   *   "#,
    r#"  /|\  "#,
    r#" //|\\ "#,
    r#"///|\\\"#,
    r#"  |||  "#,
];

/// Bare winter tree, swapped in under SNOW.
pub const TREE_BARE: &[&str] = &[
    r#" _/\_  "#,
    r#"/  | \ "#,
    r#" \ | / "#,
    r#"  \|/  "#,
];

pub const TREES: &[&[&str]] = &[TREE_LEAFY, TREE_ROUND, TREE_PINE];
pub const TREE_WINTER: &[&str] = TREE_BARE;

// ── Lamp posts ──

pub const LAMP_CLASSIC: &[&str] = &[
    r#" _O_ "#,
    r#"(_|_)"#,
    r#"  |  "#,
    r#"  |  "#,
    r#" _|_ "#,
];

pub const LAMP_MODERN: &[&str] = &[
    r#" o---."#,
    r#" |    "#,
    r#" |    "#,
    r#"_|_   "#,
];

pub const LAMPS: &[&[&str]] = &[LAMP_CLASSIC, LAMP_MODERN];

// ── Stick figures, two-frame walk cycle per direction ──

pub const WALK_R_1: &[&str] = &[
    r#" O "#,
    r#"/|>"#,
    r#"/ \"#,
];

pub const WALK_R_2: &[&str] = &[
    r#" O "#,
    r#"/|\"#,
    r#"/| "#,
];

pub const WALK_L_1: &[&str] = &[
    r#" O "#,
    r#"<|\"#,
    r#"/ \"#,
];

pub const WALK_L_2: &[&str] = &[
    r#" O "#,
    r#"/|\"#,
    r#" |\"#,
];

pub const PERSON_FRAMES_R: &[&[&str]] = &[WALK_R_1, WALK_R_2];
pub const PERSON_FRAMES_L: &[&[&str]] = &[WALK_L_1, WALK_L_2];

// ── Cars, 1 row × 6 chars (single-lane fit) ──

pub const CARS_R: &[&str] = &["=>==o>", "o>==>o"];
pub const CARS_L: &[&str] = &["<o==<=", "o<==<o"];
pub const CAR_WIDTH: i32 = 6;

// ── Street furniture ──

pub const BENCH: &[&str] = &[
    r#" ___ "#,
    r#"|___|"#,
];

pub const HYDRANT: &[&str] = &[
    r#"[T]"#,
    r#" | "#,
];

pub const TRASH_CAN: &[&str] = &[
    r#".-."#,
    r#"|_|"#,
];

pub const SIGN_POST: &[&str] = &[
    r#".--."#,
    r#"|==|"#,
    r#" || "#,
];

pub const MAILBOX: &[&str] = &[
    r#" __ "#,
    r#"|==|"#,
];

pub const FURNITURE: &[&[&str]] = &[BENCH, HYDRANT, TRASH_CAN, SIGN_POST, MAILBOX];

// ── Animals ──

pub const CAT: &[&str] = &[
    r#"/\_/\"#,
    r#"( o.o)"#,
    r#" > ^ <"#,
];

pub const DOG: &[&str] = &[
    r#"|-|_"#,
    r#"(o o)"#,
    r#" |_|"#,
];
