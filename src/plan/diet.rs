//! Diet plan generation — Mifflin–St Jeor BMR, TDEE, and a fixed macro split.
//!
//! Formula reference: Mifflin et al. (1990), A new predictive equation for
//! resting energy expenditure in healthy individuals.

use serde::{Deserialize, Serialize};

use crate::profile::{Gender, UserProfile};

/// Fixed macro shares of total calories.
const PROTEIN_SHARE: f64 = 0.30;
const CARB_SHARE: f64 = 0.40;
const FAT_SHARE: f64 = 0.30;

/// Energy density, kcal per gram.
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Goal adjustments applied to the rounded TDEE.
const WEIGHT_LOSS_FACTOR: f64 = 0.8;
const MUSCLE_GAIN_FACTOR: f64 = 1.1;

/// Daily macro targets in grams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

/// Fixed sample meal plan, independent of the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

/// An ephemeral diet plan. Deterministic given the same profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlan {
    pub daily_calories: i64,
    pub macros: MacroSplit,
    pub meal_plan: MealPlan,
    pub tips: Vec<String>,
}

/// Basal metabolic rate per Mifflin–St Jeor.
///
/// Male: `10w + 6.25h − 5a + 5`; any other gender: `10w + 6.25h − 5a − 161`.
pub fn bmr(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Generate a diet plan for a profile.
///
/// Calories are the rounded TDEE with a goal adjustment applied afterwards:
/// a 20% deficit for "weight_loss", else a 10% surplus for "muscle_gain".
/// When both tags are present only the deficit applies: weight_loss is
/// checked first and the match stops there.
pub fn diet_plan(profile: &UserProfile) -> DietPlan {
    let tdee = bmr(profile) * profile.activity_level.multiplier();
    let base_calories = tdee.round();

    let adjusted = if profile.has_goal("weight_loss") {
        (base_calories * WEIGHT_LOSS_FACTOR).round()
    } else if profile.has_goal("muscle_gain") {
        (base_calories * MUSCLE_GAIN_FACTOR).round()
    } else {
        base_calories
    };
    let daily_calories = adjusted as i64;

    let calories = daily_calories as f64;
    let macros = MacroSplit {
        protein_g: (calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN).round() as i64,
        carbs_g: (calories * CARB_SHARE / KCAL_PER_G_CARB).round() as i64,
        fats_g: (calories * FAT_SHARE / KCAL_PER_G_FAT).round() as i64,
    };

    DietPlan {
        daily_calories,
        macros,
        meal_plan: sample_meal_plan(),
        tips: tips(),
    }
}

/// Fixed sample meal plan, included verbatim in every plan.
fn sample_meal_plan() -> MealPlan {
    MealPlan {
        breakfast: vec![
            "Oatmeal with berries and a spoon of peanut butter".to_string(),
            "Greek yogurt".to_string(),
            "Black coffee or tea".to_string(),
        ],
        lunch: vec![
            "Grilled chicken breast".to_string(),
            "Brown rice".to_string(),
            "Mixed green salad with olive oil".to_string(),
        ],
        dinner: vec![
            "Baked salmon".to_string(),
            "Roasted sweet potato".to_string(),
            "Steamed broccoli".to_string(),
        ],
        snacks: vec![
            "Apple with almonds".to_string(),
            "Cottage cheese".to_string(),
            "Protein shake after training".to_string(),
        ],
    }
}

/// Fixed coaching tips, included verbatim in every plan.
fn tips() -> Vec<String> {
    [
        "Drink at least 2 liters of water per day.",
        "Aim for 7-9 hours of sleep — recovery is where progress happens.",
        "Eat protein with every meal to stay full and preserve muscle.",
        "Prepare meals ahead on busy days instead of skipping them.",
        "Weigh yourself at the same time of day for consistent tracking.",
    ]
    .iter()
    .map(|t| (*t).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ActivityLevel;

    fn reference_profile() -> UserProfile {
        let mut p = UserProfile::new("u");
        p.weight_kg = 70.0;
        p.height_cm = 170.0;
        p.age = 25;
        p.gender = Gender::Male;
        p.activity_level = ActivityLevel::Moderate;
        p
    }

    #[test]
    fn bmr_reference_male() {
        // 10*70 + 6.25*170 - 5*25 + 5 = 1673.5
        assert_eq!(bmr(&reference_profile()), 1673.5);
    }

    #[test]
    fn bmr_reference_female() {
        let mut p = reference_profile();
        p.gender = Gender::Female;
        // Same minus 166: 1507.5
        assert_eq!(bmr(&p), 1507.5);
    }

    #[test]
    fn reference_plan_without_goals() {
        let plan = diet_plan(&reference_profile());
        // round(1673.5 * 1.55) = 2594
        assert_eq!(plan.daily_calories, 2594);
        assert_eq!(plan.macros.protein_g, 195);
        assert_eq!(plan.macros.carbs_g, 259);
        assert_eq!(plan.macros.fats_g, 86);
    }

    #[test]
    fn weight_loss_deficit_applies_after_base_rounding() {
        let mut p = reference_profile();
        p.goals = vec!["weight_loss".to_string()];
        let plan = diet_plan(&p);
        // round(2594 * 0.8) = 2075
        assert_eq!(plan.daily_calories, 2075);
    }

    #[test]
    fn muscle_gain_surplus() {
        let mut p = reference_profile();
        p.goals = vec!["muscle_gain".to_string()];
        let plan = diet_plan(&p);
        // round(2594 * 1.1) = 2853
        assert_eq!(plan.daily_calories, 2853);
    }

    #[test]
    fn weight_loss_takes_precedence_over_muscle_gain() {
        let mut p = reference_profile();
        p.goals = vec!["muscle_gain".to_string(), "weight_loss".to_string()];
        let plan = diet_plan(&p);
        assert_eq!(plan.daily_calories, 2075);
    }

    #[test]
    fn unrelated_goals_leave_calories_at_tdee() {
        let mut p = reference_profile();
        p.goals = vec!["endurance".to_string()];
        assert_eq!(diet_plan(&p).daily_calories, 2594);
    }

    #[test]
    fn meal_plan_and_tips_are_fixed() {
        let a = diet_plan(&reference_profile());
        let mut p = reference_profile();
        p.weight_kg = 95.0;
        p.goals = vec!["weight_loss".to_string()];
        let b = diet_plan(&p);
        assert_eq!(a.meal_plan.breakfast, b.meal_plan.breakfast);
        assert_eq!(a.tips, b.tips);
        assert_eq!(a.tips.len(), 5);
    }
}
