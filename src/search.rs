use crate::models::Color;

/// Colors matching `search_term` on name or hex (case-insensitive substring),
/// restricted to favorites when `favorites_only` is set.
/// Keeps the input order; an empty term matches everything.
pub fn filter_colors<'a>(colors: &'a [Color], search_term: &str, favorites_only: bool) -> Vec<&'a Color> {
    let term = search_term.to_lowercase();

    colors
        .iter()
        .filter(|color| !favorites_only || color.is_favorite)
        .filter(|color| {
            term.is_empty()
                || color.name.to_lowercase().contains(&term)
                || color.hex.to_lowercase().contains(&term)
        })
        .collect()
}
