/// Building ASCII art. Window fill characters use 'o' so the buildings
/// layer can toggle them lit/dark; positions are harvested by scanning
/// the padded art.

use std::sync::OnceLock;

pub struct BuildingStyle {
    pub name: &'static str,
    /// Lines padded to a consistent width.
    pub art: Vec<String>,
    pub width: i32,
    pub height: i32,
    /// (col, row) of every window glyph.
    pub windows: Vec<(i32, i32)>,
}

fn make_style(name: &'static str, raw: &[&str]) -> BuildingStyle {
    let width = raw.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let art: Vec<String> = raw
        .iter()
        .map(|l| {
            let mut line = l.to_string();
            while line.chars().count() < width {
                line.push(' ');
            }
            line
        })
        .collect();

    let mut windows = Vec::new();
    for (r, line) in art.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            if ch == 'o' {
                windows.push((c as i32, r as i32));
            }
        }
    }

    let height = art.len() as i32;
    BuildingStyle {
        name,
        art,
        width: width as i32,
        height,
        windows,
    }
}

// ── Ranked styles, tallest to shortest ──

fn capitol_spire() -> BuildingStyle {
    make_style("capitol spire", &[
        r#"          |          "#,
        r#"          |          "#,
        r#"        _/^\_        "#,
        r#"       //^^^\\       "#,
        r#"      //^^^^^\\      "#,
        r#"      ||o.o.o||      "#,
        r#"     //.o.o.o.\\     "#,
        r#"     ||o.o.o.o||     "#,
        r#"   __||_ o.o _||__   "#,
        r#"   |.oo|o.o.o|oo.|   "#,
        r#"  _|ooo|o.o.o|ooo|_  "#,
        r#"  |"""""""""""""""|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#"  |= o.o.o.o.o.o =|  "#,
        r#" _|_ o.o.o.o.o.o _|_ "#,
        r#" |ooo|o.o.o.o.o|ooo| "#,
        r#"_|___|o.o.o.o.o|___|_"#,
        r#"|ooooo|o.o.o.o|ooooo|"#,
        r#"|=o=o=|II o II|=o=o=|"#,
        r#"|III|---"/   \"---|III|"#,
        r#"=  =  =  =  =  =  = "#,
    ])
}

fn gothic_spire() -> BuildingStyle {
    make_style("gothic spire", &[
        r#"       /\       "#,
        r#"      /||\      "#,
        r#"     / || \     "#,
        r#"    /  ||  \    "#,
        r#"   /  _||_  \   "#,
        r#"  /__|o||o|__\  "#,
        r#"  | o  ||  o |  "#,
        r#"  |  o || o  |  "#,
        r#"  | o  ||  o |  "#,
        r#"  |----||-----|  "#,
        r#"  | o  ||  o |  "#,
        r#"  |  o || o  |  "#,
        r#"  | o  ||  o |  "#,
        r#"  |----||-----|  "#,
        r#"  | o  ||  o |  "#,
        r#"  |  o || o  |  "#,
        r#"  | o  ||  o |  "#,
        r#"  |----||-----|  "#,
        r#"  | o  ||  o |  "#,
        r#"  |  o || o  |  "#,
        r#"  |____||----|  "#,
        r#"  =====//=====  "#,
    ])
}

fn domed_tower() -> BuildingStyle {
    make_style("domed tower", &[
        r#"          |~~          "#,
        r#"       ___|___         "#,
        r#"      ((((()))))       "#,
        r#"     (((((())))))      "#,
        r#"   |-------------|    "#,
        r#"   I_I_I_I_I_I_I_I    "#,
        r#"   |---------------|  "#,
        r#"   ||o| |o| |o| |o||  "#,
        r#" __|-----|---------|__ "#,
        r#" I_I_I_I|I_I_I_I_I_I| "#,
        r#" |------|-----------|  "#,
        r#" ||o| o||o| |o| |o| o|"#,
        r#" |------|-----------|  "#,
        r#" | |o|  |oooo ---  oo|"#,
        r#" | |o|  | o  |o|o| o |"#,
        r#" |------| o  |o|o|---|"#,
        r#" |      |____|_|_|   |"#,
        r#" |______|___________|  "#,
        r#" @@@@@@@/=========\@@@ "#,
        r#"        /         \    "#,
    ])
}

fn narrow_tower() -> BuildingStyle {
    make_style("narrow tower", &[
        r#"     T     "#,
        r#"    _|_    "#,
        r#"   |o.o|   "#,
        r#"   |.o.|   "#,
        r#"   |o.o|   "#,
        r#"   |___|   "#,
        r#"   |o.o|   "#,
        r#"   |.o.|   "#,
        r#"   |o.o|   "#,
        r#"  _|___|_  "#,
        r#"  |o . o|  "#,
        r#"  |. o .|  "#,
        r#"  |o . o|  "#,
        r#"  |. o .|  "#,
        r#"  |o . o|  "#,
        r#"  |. o .|  "#,
        r#"  |o . o|  "#,
        r#"  |_____|  "#,
        r#"  |[==]||  "#,
        r#"  |_____|  "#,
    ])
}

fn wide_apartment() -> BuildingStyle {
    make_style("wide apartment", &[
        r#"  _._._._._._._._._._._._._._._._  "#,
        r#"  | ___   ___    ___    ___   ___ |  "#,
        r#"  ||o|o| |o|o|  |o|o|  |o|o| |o|o|| "#,
        r#"  |IIIII_IIIII__IIIII__IIIII_IIIII|  "#,
        r#"  | ___   ___    ___    ___   ___ |  "#,
        r#"  ||o|o| |o|o|  |o|o|  |o|o| |o|o|| "#,
        r#"  |IIIII_IIIII__IIIII__IIIII_IIIII|  "#,
        r#"  | ___   ___    ___    ___   ___ |  "#,
        r#"  ||o|o| |o|o|  |o|o|  |o|o| |o|o|| "#,
        r#"  |IIIII_IIIII__IIIII__IIIII_IIIII|  "#,
        r#"  | ___   ___    ___    ___   ___ |  "#,
        r#"  ||o|o| |o|o|  |o|o|  |o|o| |o|o|| "#,
        r#"  |IIIII_IIIII__IIIII__IIIII_IIIII|  "#,
        r#"  | ___   ___   _____   ___   ___ |  "#,
        r#"  ||o|o| |o|o|  o~|~o  |o|o| |o|o|| "#,
        r#"  |IIIII_IIIII__|o|o|__IIIII_IIIII|  "#,
        r#"  |"""""""""""""/=====\"""""""""""|  "#,
        r#"  ================================== "#,
    ])
}

fn stepped_pyramid() -> BuildingStyle {
    make_style("stepped pyramid", &[
        r#"       ____            "#,
        r#"       | =|            "#,
        r#"     +-"  "-+          "#,
        r#"     | ==  =|          "#,
        r#"   +-"  == ="-+        "#,
        r#"   |=    == = |        "#,
        r#" +-" ==   =   "-+     "#,
        r#" | =  ______ ===|     "#,
        r#" | == |oooo| ==  |    "#,
        r#" +-"  |====|---. ="-+ "#,
        r#" |=== |    | o | == | "#,
        r#" | = = "----"---"=  | "#,
        r#" |==  ==== ==   ==  =|"#,
        r#" |= == == _________ =|"#,
        r#" |= = .---|oooo|oooo| |"#,
        r#" |== =| o |    |    | |"#,
        r#" |  =="---"----+----" |"#,
        r#" |_____________________|"#,
    ])
}

fn clock_tower() -> BuildingStyle {
    make_style("clock tower", &[
        r#"     ___     "#,
        r#"    /   \    "#,
        r#"    |o.o|    "#,
        r#"   /|   |\   "#,
        r#"  / |___| \  "#,
        r#" |  _____  | "#,
        r#" | |o . o| | "#,
        r#" | |. o .| | "#,
        r#" | |o . o| | "#,
        r#" | |. o .| | "#,
        r#" | |o . o| | "#,
        r#" |_|. o .|_| "#,
        r#" | |o . o| | "#,
        r#" | |_____|  |"#,
        r#" | |[==]||  |"#,
        r#" |_|_____|__|"#,
    ])
}

fn fire_escape() -> BuildingStyle {
    make_style("fire escape", &[
        r#"  ________________  "#,
        r#"  |  ___    ___  |  "#,
        r#" =|=|o.o|  |o.o|=|= "#,
        r#"  |  ---    ---  |  "#,
        r#" =|=|o.o|  |o.o|=|= "#,
        r#"  |  ---    ---  |  "#,
        r#" =|=|o.o|  |o.o|=|= "#,
        r#"  |  ---    ---  |  "#,
        r#" =|=|o.o|  |o.o|=|= "#,
        r#"  |  ---    ---  |  "#,
        r#" =|=|o.o|  |o.o|=|= "#,
        r#"  |  ___    ___  |  "#,
        r#"  |_|ooo|__|ooo|_|  "#,
        r#"  ==================  "#,
    ])
}

fn warehouse_loft() -> BuildingStyle {
    make_style("warehouse loft", &[
        r#" _____________________________ "#,
        r#" |  _____  _____  _____  ___ | "#,
        r#" | | o o || o o || o o || o || "#,
        r#" | |_____||_____||_____||___|| "#,
        r#" |  _____  _____  _____  ___ | "#,
        r#" | | o o || o o || o o || o || "#,
        r#" | |_____||_____||_____||___|| "#,
        r#" |  _____  _____  _____  ___ | "#,
        r#" | | o o || o o || o o || o || "#,
        r#" | |_____||_____||_____||___|| "#,
        r#" | /===\  [====]  /===\ [==] | "#,
        r#" |___________________________| "#,
    ])
}

fn corner_shop() -> BuildingStyle {
    make_style("corner shop", &[
        r#"  ____________  "#,
        r#" |  __    __  | "#,
        r#" | |oo|  |oo| | "#,
        r#" | |__|  |__| | "#,
        r#" |  __    __  | "#,
        r#" | |oo|  |oo| | "#,
        r#" | |__|  |__| | "#,
        r#" | [========] | "#,
        r#" |____|____|__| "#,
    ])
}

/// Scaffolding + crane, used for unbonded tokens regardless of rank.
fn construction_site() -> BuildingStyle {
    make_style("construction", &[
        r#"  _/|         "#,
        r#"   |----.     "#,
        r#"   |    |     "#,
        r#"  .|.   |     "#,
        r#"  #|# __|__   "#,
        r#"  #|# |o  o|  "#,
        r#"  #|# |    |  "#,
        r#"  #|# |o  o|  "#,
        r#"  #|# |____|  "#,
        r#"  #|# |o  o|  "#,
        r#"  #|#_|    |  "#,
        r#"  ====|____|  "#,
    ])
}

static RANKED: OnceLock<Vec<BuildingStyle>> = OnceLock::new();
static CONSTRUCTION: OnceLock<BuildingStyle> = OnceLock::new();

/// All regular styles, sorted tallest to shortest for mcap-based sizing.
pub fn ranked_styles() -> &'static [BuildingStyle] {
    RANKED.get_or_init(|| {
        vec![
            capitol_spire(),
            gothic_spire(),
            domed_tower(),
            narrow_tower(),
            wide_apartment(),
            stepped_pyramid(),
            clock_tower(),
            fire_escape(),
            warehouse_loft(),
            corner_shop(),
        ]
    })
}

pub fn construction() -> &'static BuildingStyle {
    CONSTRUCTION.get_or_init(construction_site)
}

/// Style for an mcap rank (0 = highest mcap = tallest). New (unbonded)
/// tokens always resolve to the construction style.
pub fn style_for_mcap_rank(rank: usize, is_new: bool) -> &'static BuildingStyle {
    if is_new {
        return construction();
    }
    let styles = ranked_styles();
    &styles[rank.min(styles.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_are_monotonic_tallest_first() {
        let styles = ranked_styles();
        assert_eq!(styles.len(), 10);
        for pair in styles.windows(2) {
            assert!(pair[0].height >= pair[1].height);
        }
        assert!(styles[0].height > styles[9].height);
    }

    #[test]
    fn every_style_has_windows_and_padded_rows() {
        for style in ranked_styles().iter().chain(std::iter::once(construction())) {
            assert!(!style.windows.is_empty(), "{} has no windows", style.name);
            for line in &style.art {
                assert_eq!(line.chars().count() as i32, style.width);
            }
            for &(c, r) in &style.windows {
                assert!(c >= 0 && c < style.width);
                assert!(r >= 0 && r < style.height);
            }
        }
    }

    #[test]
    fn new_tokens_always_get_construction() {
        for rank in 0..10 {
            assert_eq!(style_for_mcap_rank(rank, true).name, "construction");
        }
        assert_eq!(style_for_mcap_rank(0, false).name, "capitol spire");
        assert_eq!(style_for_mcap_rank(9, false).name, "corner shop");
        // Ranks past the table clamp to the shortest style.
        assert_eq!(style_for_mcap_rank(15, false).name, "corner shop");
    }
}
