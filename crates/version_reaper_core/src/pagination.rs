use std::iter::FusedIterator;

use crate::records::Page;

/// Lazy sequence over a marker-paginated listing.
///
/// Pages are pulled on demand: the first request carries no marker, each
/// following request carries the marker returned by the previous page. The
/// sequence ends when a page returns no marker (an empty marker counts as
/// none). A fetch error is yielded once and the sequence is then exhausted.
/// Each listing builds a fresh `Paginated`; it never rewinds.
pub struct Paginated<T, E, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>,
{
    fetch: F,
    buffered: std::vec::IntoIter<T>,
    next_marker: Option<String>,
    finished: bool,
}

impl<T, E, F> Paginated<T, E, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffered: Vec::new().into_iter(),
            next_marker: None,
            finished: false,
        }
    }
}

impl<T, E, F> Iterator for Paginated<T, E, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }

            match (self.fetch)(self.next_marker.as_deref()) {
                Ok(page) => {
                    self.next_marker = page.next_marker.filter(|marker| !marker.is_empty());
                    self.finished = self.next_marker.is_none();
                    self.buffered = page.items.into_iter();
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl<T, E, F> FusedIterator for Paginated<T, E, F> where
    F: FnMut(Option<&str>) -> Result<Page<T>, E>
{
}
