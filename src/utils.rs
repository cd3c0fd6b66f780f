//! Common utility functions shared across the codebase.

/// Upper-cases the first character and lower-cases the rest.
///
/// # Examples
///
/// ```
/// use resgen::utils::title_case;
///
/// assert_eq!(title_case("shop"), "Shop");
/// assert_eq!(title_case("BLOG"), "Blog");
/// assert_eq!(title_case("order_items"), "Order_items");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
