//! Cleaning heuristics shared by the provider generalizers.
//!
//! Every function here is pure: it takes raw provider text and returns the
//! cleaned value, or `None` when nothing usable remains.
//!
//! - [`text`]: low-level string primitives (case checks, placeholders, ages)
//! - [`name`]: display-case standardization for upper-case names
//! - [`date`]: choosing between parallel date fields and reformatting dates
//! - [`place`]: choosing between parallel place fields and joining parts
//! - [`enums`]: mapping free text onto gender, marital status and quarters

pub mod date;
pub mod enums;
pub mod name;
pub mod place;
pub mod text;

pub use date::{
    approximate_year_before, clean_dd_mm_yyyy_date, clean_dd_month_yyyy_date, select_date,
};
pub use enums::{
    quarter_from_label, standardize_gender, standardize_marital_status,
    standardize_relationship_to_head,
};
pub use name::standardize_name;
pub use place::{clean_place, join_place_parts, select_place, standardize_place_name};
pub use text::{
    clean_age, clean_occupation, is_all_uppercase, is_dash_placeholder, last_word,
    non_empty, strip_angle_brackets, to_initial_caps_each_word,
};
