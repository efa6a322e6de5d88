//! Page buttons for the result list.

/// One page button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    /// The page being shown; not clickable
    pub active: bool,
}

/// What the pager shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PagerView {
    /// Everything fits on one page
    #[default]
    Hidden,
    Visible {
        /// Page size the buttons re-search with
        size: u32,
        buttons: Vec<PageButton>,
    },
}

impl PagerView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, PagerView::Hidden)
    }

    pub fn buttons(&self) -> &[PageButton] {
        match self {
            PagerView::Hidden => &[],
            PagerView::Visible { buttons, .. } => buttons,
        }
    }

    /// `(page, size)` to search for when `page` is clicked.
    /// `None` for the active button, a page that isn't shown, or a hidden pager.
    pub fn click(&self, page: u32) -> Option<(u32, u32)> {
        match self {
            PagerView::Hidden => None,
            PagerView::Visible { size, buttons } => buttons
                .iter()
                .find(|b| b.page == page && !b.active)
                .map(|b| (b.page, *size)),
        }
    }
}

/// Lay out the pager for a result page.
///
/// Hidden when one page holds every result (including `total == 0`);
/// otherwise one button per page with `page` marked active.
pub fn compute_pager(page: u32, size: u32, total: u64) -> PagerView {
    let size = size.max(1);
    if u64::from(size) >= total {
        return PagerView::Hidden;
    }
    let total_pages = total.div_ceil(u64::from(size));
    let buttons = (1..=total_pages)
        .map(|p| {
            let p = u32::try_from(p).unwrap_or(u32::MAX);
            PageButton {
                page: p,
                active: p == page,
            }
        })
        .collect();
    PagerView::Visible { size, buttons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_hundred_twenty_results_make_three_pages() {
        let pager = compute_pager(1, 50, 120);
        let pages: Vec<u32> = pager.buttons().iter().map(|b| b.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(pager.buttons()[0].active);
        assert!(!pager.buttons()[1].active);
    }

    #[test]
    fn fewer_results_than_a_page_hide_the_pager() {
        assert!(compute_pager(1, 50, 30).is_hidden());
        assert!(compute_pager(1, 50, 50).is_hidden());
        assert!(compute_pager(1, 50, 0).is_hidden());
    }

    #[test]
    fn clicking_the_active_page_does_nothing() {
        let pager = compute_pager(2, 50, 120);
        assert_eq!(pager.click(2), None);
        assert_eq!(pager.click(3), Some((3, 50)));
        assert_eq!(pager.click(4), None);
        assert_eq!(PagerView::Hidden.click(1), None);
    }

    proptest! {
        #[test]
        fn visibility_and_button_count(size in 1u32..200, total in 0u64..5_000, page in 1u32..100) {
            let pager = compute_pager(page, size, total);
            if u64::from(size) >= total {
                prop_assert!(pager.is_hidden());
            } else {
                let expected = (total + u64::from(size) - 1) / u64::from(size);
                prop_assert_eq!(pager.buttons().len() as u64, expected);
                let active: Vec<_> = pager.buttons().iter().filter(|b| b.active).collect();
                if u64::from(page) <= expected {
                    prop_assert_eq!(active.len(), 1);
                    prop_assert_eq!(active[0].page, page);
                } else {
                    prop_assert!(active.is_empty());
                }
            }
        }
    }
}
