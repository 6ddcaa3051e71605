/// Cloud shapes, small to massive.

pub const CLOUD_SMALL: &[&str] = &[
    r#"  .-~~~-. "#,
    r#" /       \"#,
    r#"'~~~~~~~~~'"#,
];

pub const CLOUD_MEDIUM: &[&str] = &[
    r#"     .---.       "#,
    r#"  .-(     )-.    "#,
    r#" /           \   "#,
    r#"'~~~~~~~~~~~~~'  "#,
];

pub const CLOUD_LARGE: &[&str] = &[
    r#"        .-~~~-.         "#,
    r#"   .- ~(       )~ -.    "#,
    r#"  /                  \   "#,
    r#" (                    ) "#,
    r#"  '~~~~~~~~~~~~~~~~~~~' "#,
];

pub const CLOUD_DARK: &[&str] = &[
    r#"     ._==_.        "#,
    r#"   .(######).      "#,
    r#"  /##########\     "#,
    r#" (############)    "#,
    r#"  '~~~~~~~~~~'     "#,
];

// ── Massive clouds, for visual impact when the sky is busy ──

pub const CLOUD_MASSIVE_1: &[&str] = &[
    r#"              .----.                         "#,
    r#"        .----(      )----.                   "#,
    r#"    .--'                  '--.               "#,
    r#"  /'                          '\             "#,
    r#" /                              \            "#,
    r#"(                                )           "#,
    r#" \                              /            "#,
    r#"  '----.                .------'             "#,
    r#"        '----.    .----'                     "#,
    r#"              '---'                           "#,
];

pub const CLOUD_MASSIVE_2: &[&str] = &[
    r#"                  .--.                        "#,
    r#"           .--.-(    )--.                     "#,
    r#"      .---(              '--.                 "#,
    r#"    /'                       '\               "#,
    r#"  /'                           '\             "#,
    r#" (        .---.                  )            "#,
    r#"  \.---.-'     '-.              /             "#,
    r#"   '---           '-.     .---'              "#,
    r#"                      '---'                   "#,
];

pub const CLOUD_MASSIVE_DARK: &[&str] = &[
    r#"            .=====.                           "#,
    r#"      .====(#######)====.                     "#,
    r#"   .==(####################)==.               "#,
    r#"  /##############################\            "#,
    r#" (################################)           "#,
    r#"  \##############################/            "#,
    r#"   '==(####################)=='               "#,
    r#"       '==================='                  "#,
];

pub const CLOUD_SHAPES: &[&[&str]] = &[CLOUD_SMALL, CLOUD_MEDIUM, CLOUD_LARGE, CLOUD_DARK];
pub const CLOUD_MASSIVE: &[&[&str]] = &[CLOUD_MASSIVE_1, CLOUD_MASSIVE_2];
