use super::ValidationError;
use std::{fmt::Display, num::NonZeroU64, str::FromStr};

/// A request for one zero-indexed page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The zero-based page index
    pub number: u64,
    /// The maximum number of items per page
    pub size: NonZeroU64,
    /// The requested ordering; `None` means ascending id
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Request page `number` of `size` items in insertion order.
    pub const fn new(number: u64, size: NonZeroU64) -> Self {
        Self {
            number,
            size,
            sort: None,
        }
    }

    /// Use the given ordering instead of insertion order.
    pub const fn sorted(self, sort: Sort) -> Self {
        Self {
            sort: Some(sort),
            ..self
        }
    }

    /// The number of items preceding this page, or `None` if that overflows.
    pub const fn offset(&self) -> Option<u64> {
        self.number.checked_mul(self.size.get())
    }
}

/// A slice of a collection along with the collection's total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on the requested page, possibly none
    pub items: Vec<T>,
    /// The number of items in the whole collection
    pub total: u64,
}

/// Describes where a page sits within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PageMetadata {
    /// The requested page size
    pub size: u64,
    /// The number of items in the whole collection
    pub total_elements: u64,
    /// The number of non-empty pages
    pub total_pages: u64,
    /// The zero-based index of this page
    pub number: u64,
}

impl PageMetadata {
    /// Describe the page `request` selects from a collection of `total_elements`.
    pub const fn new(request: &PageRequest, total_elements: u64) -> Self {
        Self {
            size: request.size.get(),
            total_elements,
            total_pages: total_elements.div_ceil(request.size.get()),
            number: request.number,
        }
    }

    /// The index of the following page, if there is one.
    pub const fn next(&self) -> Option<u64> {
        // number + 1 < total_pages, without overflowing
        if self.number < self.total_pages.saturating_sub(1) {
            Some(self.number + 1)
        } else {
            None
        }
    }

    /// The index of the preceding page, if this is not the first.
    ///
    /// Pages beyond the end still point back at their predecessor.
    pub const fn prev(&self) -> Option<u64> {
        self.number.checked_sub(1)
    }

    /// The index of the first page, when there is more than one page.
    pub const fn first(&self) -> Option<u64> {
        if self.total_pages > 1 { Some(0) } else { None }
    }

    /// The index of the last page, when there is more than one page.
    pub const fn last(&self) -> Option<u64> {
        if self.total_pages > 1 {
            Some(self.total_pages - 1)
        } else {
            None
        }
    }
}

/// The properties an offer collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    /// The store-assigned id (insertion order)
    Id,
    /// The creation timestamp
    CreatedAt,
    /// The description text
    Description,
    /// The numeric price value, irrespective of currency
    Price,
    /// The cancellation flag
    Cancelled,
}

impl SortProperty {
    const NAMES: [(&'static str, Self); 5] = [
        ("id", Self::Id),
        ("createdAt", Self::CreatedAt),
        ("description", Self::Description),
        ("price", Self::Price),
        ("cancelled", Self::Cancelled),
    ];

    /// The name used in query strings
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find_map(|(name, property)| (*property == self).then_some(*name))
            .unwrap_or_default()
    }
}

/// Ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

/// An ordering over a collection of offers.
///
/// The text form is `property[,direction]`, e.g. `price,desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// What to order by
    pub property: SortProperty,
    /// Which way
    pub direction: Direction,
}

impl FromStr for Sort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(',') {
            Some((property, direction)) => (property.trim(), Some(direction.trim())),
            None => (s.trim(), None),
        };

        let property = SortProperty::NAMES
            .iter()
            .find_map(|(name, value)| (*name == property).then_some(*value))
            .ok_or_else(|| ValidationError::UnknownSortProperty(property.to_string()))?;

        let direction = match direction {
            None | Some("") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => return Err(ValidationError::UnknownSortDirection(d.to_string())),
        };

        Ok(Self {
            property,
            direction,
        })
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{}", self.property.name(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metadata(number: u64, size: u64, total: u64) -> PageMetadata {
        PageMetadata::new(
            &PageRequest::new(number, NonZeroU64::new(size).unwrap()),
            total,
        )
    }

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    #[case(2, 1, 2)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] size: u64, #[case] pages: u64) {
        assert_eq!(metadata(0, size, total).total_pages, pages);
    }

    #[test]
    fn first_of_two_pages() {
        let page = metadata(0, 1, 2);
        assert_eq!(page.next(), Some(1));
        assert_eq!(page.prev(), None);
        assert_eq!(page.first(), Some(0));
        assert_eq!(page.last(), Some(1));
    }

    #[test]
    fn last_of_two_pages() {
        let page = metadata(1, 1, 2);
        assert_eq!(page.next(), None);
        assert_eq!(page.prev(), Some(0));
    }

    #[test]
    fn beyond_the_end() {
        let page = metadata(2, 1, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.next(), None);
        assert_eq!(page.prev(), Some(1));
    }

    #[test]
    fn empty_collection() {
        let page = metadata(0, 20, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.next(), None);
        assert_eq!(page.prev(), None);
        assert_eq!(page.first(), None);
        assert_eq!(page.last(), None);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = metadata(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(page.next(), None);
        assert_eq!(page.prev(), Some(u64::MAX - 1));
        assert_eq!(
            PageRequest::new(u64::MAX, NonZeroU64::new(2).unwrap()).offset(),
            None
        );
    }

    #[rstest]
    #[case("price", SortProperty::Price, Direction::Asc)]
    #[case("description,desc", SortProperty::Description, Direction::Desc)]
    #[case("createdAt,ASC", SortProperty::CreatedAt, Direction::Asc)]
    #[case("cancelled,", SortProperty::Cancelled, Direction::Asc)]
    fn parses_sort(
        #[case] text: &str,
        #[case] property: SortProperty,
        #[case] direction: Direction,
    ) {
        assert_eq!(
            text.parse::<Sort>(),
            Ok(Sort {
                property,
                direction
            })
        );
    }

    #[test]
    fn rejects_bad_sort() {
        assert_eq!(
            "active".parse::<Sort>(),
            Err(ValidationError::UnknownSortProperty("active".to_string()))
        );
        assert_eq!(
            "id,sideways".parse::<Sort>(),
            Err(ValidationError::UnknownSortDirection("sideways".to_string()))
        );
    }

    #[test]
    fn sort_round_trips_through_text() {
        let sort: Sort = "price,desc".parse().unwrap();
        assert_eq!(sort.to_string(), "price,desc");
        assert_eq!(sort.to_string().parse::<Sort>(), Ok(sort));
    }
}
