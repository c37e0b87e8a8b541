/// The closed set of listing categories. Listings always carry one of these
/// labels; the backend stores them as plain text.
pub const CATEGORIES: [&str; 19] = [
    "Vehicles",
    "Property Rentals",
    "Apparel",
    "Classifieds",
    "Electronics",
    "Entertainment",
    "Family",
    "Free Stuff",
    "Garden & Outdoor",
    "Hobbies",
    "Home Goods",
    "Home Improvement",
    "Home Sales",
    "Musical Instruments",
    "Office Supplies",
    "Pet Supplies",
    "Sporting Goods",
    "Toys & Games",
    "Buy and sell groups",
];

/// Pseudo-category shown at the top of the sidebar. It is never stored on a
/// listing: selecting it browses a random sample across every category.
pub const TODAYS_PICKS: &str = "Today's picks";

/// Whether `label` is one of the real categories a listing may carry.
/// `TODAYS_PICKS` is deliberately not a member.
pub fn is_listed(label: &str) -> bool {
    CATEGORIES.contains(&label)
}
