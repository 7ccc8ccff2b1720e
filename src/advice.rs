//! Annotation rule engine
//!
//! Maps a logged entry's attributes to an advisory comment, evaluated in a
//! fixed priority order with the first matching rule winning. The journal
//! stores the result denormalized on the record at create/edit time, so
//! historical comments stay stable even if this rule table changes later.

use crate::model::MealType;

/// Keywords marking a food label as a snack or dessert choice.
const SNACK_KEYWORDS: &[&str] = &[
    "cake",
    "cookie",
    "candy",
    "chocolate",
    "chips",
    "donut",
    "doughnut",
    "ice cream",
    "soda",
    "dessert",
    "pastry",
    "biscuit",
];

/// Advisory comment for an entry, first matching rule wins:
///
/// 1. over 600 kcal: high-calorie advisory with the rounded value
/// 2. under 200 kcal and not a snack: low-calorie advisory
/// 3. snack meal type or snack/dessert keyword in the label
/// 4. otherwise: the generic balanced-diet advisory
pub fn advisory(food_item: &str, calorie_estimate: f64, meal_type: Option<MealType>) -> String {
    if calorie_estimate > 600.0 {
        return format!(
            "This looks quite calorie-dense at around {} kcal. Consider balancing \
             the rest of your day with lighter meals.",
            calorie_estimate.round() as i64
        );
    }

    if calorie_estimate < 200.0 && meal_type != Some(MealType::Snack) {
        return "This is a fairly light meal. Make sure you're eating enough to stay \
                energized through the day."
            .to_string();
    }

    if meal_type == Some(MealType::Snack) || contains_snack_keyword(food_item) {
        return "Snacks are fine in moderation. Pairing them with protein or fiber \
                helps the energy last longer."
            .to_string();
    }

    "Nice choice. Keep aiming for a balanced mix of protein, vegetables, and whole \
     grains."
        .to_string()
}

fn contains_snack_keyword(food_item: &str) -> bool {
    let lowered = food_item.to_lowercase();
    SNACK_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_calorie_interpolates_rounded_value() {
        let comment = advisory("double bacon burger", 748.6, Some(MealType::Dinner));
        assert!(comment.contains("749 kcal"));
    }

    #[test]
    fn test_high_calorie_beats_snack_rule() {
        // 700 kcal snack hits rule 1, not rule 3.
        let comment = advisory("giant chocolate cake", 700.0, Some(MealType::Snack));
        assert!(comment.contains("700 kcal"));
        assert!(!comment.contains("moderation"));
    }

    #[test]
    fn test_low_calorie_excludes_snacks() {
        let comment = advisory("side salad", 120.0, Some(MealType::Lunch));
        assert!(comment.contains("light meal"));

        // A light snack falls through to the snack rule instead.
        let comment = advisory("apple slices", 80.0, Some(MealType::Snack));
        assert!(comment.contains("moderation"));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let comment = advisory("Grandma's Ice Cream Sundae", 350.0, None);
        assert!(comment.contains("moderation"));
    }

    #[test]
    fn test_generic_fallback() {
        let comment = advisory("grilled chicken with rice", 430.0, Some(MealType::Dinner));
        assert!(comment.contains("balanced"));
    }
}
