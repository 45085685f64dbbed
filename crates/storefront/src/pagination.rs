//! Page bar.
//!
//! Stateless: every page number from 1 to the total is rendered, with no
//! windowing. Clicking a button yields a [`PageChange`] for the catalog.

use std::fmt;

/// Request to show the given page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange(pub usize);

/// One clickable page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub current: bool,
}

impl PageButton {
    /// The event emitted when this button is clicked.
    #[must_use]
    pub const fn click(&self) -> PageChange {
        PageChange(self.number)
    }
}

/// Page bar for `(current_page, total_pages)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    total_pages: usize,
}

impl Pagination {
    #[must_use]
    pub const fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Buttons `1..=total_pages`; empty when there are no pages.
    #[must_use]
    pub fn buttons(&self) -> Vec<PageButton> {
        (1..=self.total_pages)
            .map(|number| PageButton {
                number,
                current: number == self.current_page,
            })
            .collect()
    }

    /// Click the button for `page`, if it is rendered.
    #[must_use]
    pub fn click(&self, page: usize) -> Option<PageChange> {
        (1..=self.total_pages)
            .contains(&page)
            .then_some(PageChange(page))
    }
}

/// Renders as `1 [2] 3`, the current page bracketed.
impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, button) in self.buttons().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if button.current {
                write!(f, "[{}]", button.number)?;
            } else {
                write!(f, "{}", button.number)?;
            }
        }
        Ok(())
    }
}
