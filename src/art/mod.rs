pub mod buildings;
pub mod clouds;
pub mod street;

/// Widest line of a sprite.
pub fn art_width(art: &[&str]) -> i32 {
    art.iter().map(|l| l.chars().count() as i32).max().unwrap_or(0)
}

/// Row count of a sprite.
pub fn art_height(art: &[&str]) -> i32 {
    art.len() as i32
}
