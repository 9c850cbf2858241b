//! Gallery filter state.
//!
//! The gallery is filtered by at most two tag slugs at a time. The selection
//! is mirrored 1:1 with the page's query string — zero to two repeated `tag`
//! parameters — so a reload or a shared link reproduces the same filtered
//! view. Nothing else about the filter is persisted anywhere.
//!
//! ## Intersection, not union
//!
//! With k tags selected, an image qualifies only when its own tag-slug set
//! contains *all* k selected slugs. An image tagged with three slugs where
//! two match still qualifies at k = 2; an image matching only one of two
//! selected tags is excluded. k = 0 means unfiltered.
//!
//! ## Value semantics
//!
//! [`FilterSelection::toggle`] returns a new selection rather than mutating.
//! The page renders one tag button per known tag, and the `href` of each
//! button is simply the query string of `selection.toggle(that_slug)` — the
//! state transition *is* the link target, so there is no ambient mutable
//! filter state anywhere.

/// Upper bound on simultaneously selected tags.
///
/// Two is deliberate: the gallery's tag vocabulary pairs an era tag
/// (`oldschool`/`newschool`) with a subject tag, and three-way
/// intersections are empty in practice.
pub const MAX_SELECTED: usize = 2;

/// An ordered set of at most [`MAX_SELECTED`] unique tag slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    slugs: Vec<String>,
}

impl FilterSelection {
    /// Empty selection (unfiltered gallery).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from decoded query-string pairs.
    ///
    /// Collects repeated `tag` parameters in order. Duplicate slugs are
    /// dropped and anything past the first two values is silently
    /// truncated — an over-long URL is never an error.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selection = Self::new();
        for (key, value) in pairs {
            if key == "tag" && !value.is_empty() {
                selection.push(value);
            }
        }
        selection
    }

    fn push(&mut self, slug: &str) {
        if self.slugs.len() < MAX_SELECTED && !self.contains(slug) {
            self.slugs.push(slug.to_string());
        }
    }

    /// Toggle a slug, returning the resulting selection.
    ///
    /// - already selected → removed
    /// - room left → appended
    /// - selection full and slug is new → unchanged (silent no-op)
    #[must_use]
    pub fn toggle(&self, slug: &str) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.slugs.iter().position(|s| s == slug) {
            next.slugs.remove(pos);
        } else if next.slugs.len() < MAX_SELECTED {
            next.slugs.push(slug.to_string());
        }
        next
    }

    /// The empty selection. Exists for symmetry with the page's
    /// "Clear Filters" control.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Selected slugs in selection order.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Superset test: does an image with these tag slugs satisfy the
    /// selection? Always true for the empty selection.
    pub fn matches(&self, image_tags: &[String]) -> bool {
        self.slugs
            .iter()
            .all(|selected| image_tags.iter().any(|t| t == selected))
    }

    /// Serialize as query-string pairs: `tag=a&tag=b`, or `""` when empty.
    ///
    /// Slugs are URL-safe by construction (the store enforces slug
    /// format), so no percent-encoding is applied here.
    pub fn to_query_string(&self) -> String {
        self.slugs
            .iter()
            .map(|s| format!("tag={s}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Sort items by caption: case-insensitive, ascending, missing captions
/// sorting as the empty string (and therefore first). The sort is stable,
/// so store-assigned order breaks ties.
pub fn sort_by_caption<T, F>(items: &mut [T], caption: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| caption(item).to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(slugs: &[&str]) -> Vec<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // toggle()
    // =========================================================================

    #[test]
    fn toggle_adds_to_empty_selection() {
        let s = FilterSelection::new().toggle("oldschool");
        assert_eq!(s.slugs(), ["oldschool"]);
    }

    #[test]
    fn toggle_adds_second_slug_in_order() {
        let s = FilterSelection::new()
            .toggle("oldschool")
            .toggle("newschool");
        assert_eq!(s.slugs(), ["oldschool", "newschool"]);
    }

    #[test]
    fn toggle_removes_selected_slug() {
        let s = FilterSelection::new()
            .toggle("oldschool")
            .toggle("newschool")
            .toggle("oldschool");
        assert_eq!(s.slugs(), ["newschool"]);
    }

    #[test]
    fn toggle_is_noop_when_full() {
        let full = FilterSelection::new().toggle("a").toggle("b");
        let after = full.toggle("c");
        assert_eq!(after, full);
    }

    #[test]
    fn toggle_noop_is_idempotent_when_full() {
        // Double-toggling a new slug against a full selection stays a no-op:
        // the first call must not half-apply anything the second could see.
        let full = FilterSelection::new().toggle("a").toggle("b");
        let once = full.toggle("c");
        let twice = once.toggle("c");
        assert_eq!(once, full);
        assert_eq!(twice, full);
    }

    #[test]
    fn toggle_can_add_again_after_removal() {
        let s = FilterSelection::new()
            .toggle("a")
            .toggle("b")
            .toggle("a")
            .toggle("c");
        assert_eq!(s.slugs(), ["b", "c"]);
    }

    #[test]
    fn clear_empties_selection() {
        let s = FilterSelection::new().toggle("a").toggle("b").clear();
        assert!(s.is_empty());
    }

    // =========================================================================
    // from_pairs() — URL round trip
    // =========================================================================

    #[test]
    fn from_pairs_reads_repeated_tag_params() {
        let s = FilterSelection::from_pairs([("tag", "oldschool"), ("tag", "newschool")]);
        assert_eq!(s.slugs(), ["oldschool", "newschool"]);
    }

    #[test]
    fn from_pairs_ignores_other_params() {
        let s = FilterSelection::from_pairs([("photo", "3"), ("tag", "oldschool")]);
        assert_eq!(s.slugs(), ["oldschool"]);
    }

    #[test]
    fn from_pairs_truncates_to_two() {
        let s = FilterSelection::from_pairs([("tag", "a"), ("tag", "b"), ("tag", "c")]);
        assert_eq!(s.slugs(), ["a", "b"]);
    }

    #[test]
    fn from_pairs_drops_duplicates() {
        let s = FilterSelection::from_pairs([("tag", "a"), ("tag", "a"), ("tag", "b")]);
        assert_eq!(s.slugs(), ["a", "b"]);
    }

    #[test]
    fn from_pairs_skips_empty_values() {
        let s = FilterSelection::from_pairs([("tag", ""), ("tag", "a")]);
        assert_eq!(s.slugs(), ["a"]);
    }

    #[test]
    fn query_string_round_trip() {
        let s = FilterSelection::new()
            .toggle("oldschool")
            .toggle("newschool");
        assert_eq!(s.to_query_string(), "tag=oldschool&tag=newschool");

        let query = s.to_query_string();
        let pairs: Vec<(&str, &str)> = query
            .split('&')
            .map(|p| p.split_once('=').unwrap())
            .collect();
        assert_eq!(FilterSelection::from_pairs(pairs), s);
    }

    #[test]
    fn empty_selection_serializes_to_empty_string() {
        assert_eq!(FilterSelection::new().to_query_string(), "");
    }

    // =========================================================================
    // matches() — intersection semantics
    // =========================================================================

    #[test]
    fn empty_selection_matches_everything() {
        let s = FilterSelection::new();
        assert!(s.matches(&tags(&["a", "b"])));
        assert!(s.matches(&[]));
    }

    #[test]
    fn single_tag_selection_requires_that_tag() {
        let s = FilterSelection::new().toggle("oldschool");
        assert!(s.matches(&tags(&["oldschool", "portraits"])));
        assert!(!s.matches(&tags(&["newschool"])));
        assert!(!s.matches(&[]));
    }

    #[test]
    fn two_tag_selection_requires_both() {
        let s = FilterSelection::new().toggle("a").toggle("b");
        // Superset qualifies, even with extra tags
        assert!(s.matches(&tags(&["b", "c", "a"])));
        // Partial match is excluded — intersection, not union
        assert!(!s.matches(&tags(&["a", "c"])));
        assert!(!s.matches(&tags(&["b"])));
    }

    #[test]
    fn filter_scenario_oldschool_then_both_then_clear() {
        let images: Vec<Vec<String>> = vec![
            tags(&["oldschool"]),
            tags(&["newschool"]),
            tags(&["oldschool", "newschool"]),
            tags(&[]),
        ];
        let survivors = |s: &FilterSelection| -> Vec<usize> {
            images
                .iter()
                .enumerate()
                .filter(|(_, t)| s.matches(t))
                .map(|(i, _)| i)
                .collect()
        };

        let one = FilterSelection::new().toggle("oldschool");
        assert_eq!(survivors(&one), [0, 2]);
        assert_eq!(one.to_query_string(), "tag=oldschool");

        let both = one.toggle("newschool");
        assert_eq!(survivors(&both), [2]);
        assert_eq!(both.to_query_string(), "tag=oldschool&tag=newschool");

        let cleared = both.clear();
        assert_eq!(survivors(&cleared), [0, 1, 2, 3]);
        assert_eq!(cleared.to_query_string(), "");
    }

    // =========================================================================
    // sort_by_caption()
    // =========================================================================

    #[test]
    fn sort_is_case_insensitive_with_empty_first() {
        let mut captions = vec!["Banana", "", "apple"];
        sort_by_caption(&mut captions, |c| c);
        assert_eq!(captions, ["", "apple", "Banana"]);
    }

    #[test]
    fn sort_is_stable_for_equal_captions() {
        let mut items = vec![("dusk", 1), ("Dusk", 2), ("dawn", 3)];
        sort_by_caption(&mut items, |(c, _)| c);
        // "dusk" and "Dusk" compare equal case-insensitively; input order holds
        assert_eq!(items, [("dawn", 3), ("dusk", 1), ("Dusk", 2)]);
    }
}
