//! Well-known state paths.
//!
//! The store is addressed by dot-delimited path strings. Every path the
//! engine itself reads or writes is named here so callers and subscribers
//! share one vocabulary instead of scattering string literals.

/// Whether a bulk data load is in flight.
pub const IS_LOADING: &str = "isLoading";

/// Active category filter (`Category.id` or [`ALL_CATEGORIES`]).
pub const CURRENT_CATEGORY: &str = "currentCategory";

/// Active search query (case-insensitive substring match).
pub const SEARCH_QUERY: &str = "searchQuery";

/// Pagination container.
pub const PAGINATION: &str = "pagination";
pub const CURRENT_PAGE: &str = "pagination.currentPage";
pub const ITEMS_PER_PAGE: &str = "pagination.itemsPerPage";
pub const TOTAL_PAGES: &str = "pagination.totalPages";

/// Catalog data container.
pub const SVG_DATA: &str = "svgData";
pub const ITEMS: &str = "svgData.items";
pub const CATEGORIES: &str = "svgData.categories";
pub const IS_LOADED: &str = "svgData.isLoaded";

/// Favorited item ids.
pub const FAVORITES: &str = "favorites";

/// Content cache (`filePath` -> raw SVG markup).
pub const SVG_CACHE: &str = "svgCache";

/// Subscription sentinel receiving every mutation with a full snapshot.
pub const ALL: &str = "*";

/// Category filter sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";
