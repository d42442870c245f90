// Client-side activity calorie computation
//
// The service stores calories_burned exactly as submitted, so the client
// computes it before posting: a flat per-activity coefficient (kcal per
// minute per kg of body weight) times weight times duration.

/// Weight assumed when the profile has not been loaded yet
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// kcal/min/kg per activity, in the service's activity vocabulary.
/// Unknown names fall back to the walking coefficient.
const COEFFICIENTS: &[(&str, f64)] = &[
    ("Caminhada", 0.05),
    ("Corrida", 0.15),
    ("Ciclismo", 0.12),
    ("Natação", 0.14),
    ("Musculação", 0.09),
    ("Yoga", 0.04),
    ("Dança", 0.08),
    ("Futebol", 0.13),
    ("Basquete", 0.12),
    ("Tênis", 0.11),
];

const WALKING_COEFFICIENT: f64 = 0.05;

/// Names of the known activities, for the form hint
pub fn known_activities() -> impl Iterator<Item = &'static str> {
    COEFFICIENTS.iter().map(|(name, _)| *name)
}

fn coefficient(activity: &str) -> f64 {
    COEFFICIENTS
        .iter()
        .find(|(name, _)| *name == activity)
        .map(|(_, coef)| *coef)
        .unwrap_or(WALKING_COEFFICIENT)
}

/// Calories burned for an activity: `round(coef * weight * minutes)`
pub fn calculate_activity_calories(activity: &str, duration_minutes: u32, weight_kg: f64) -> i64 {
    (coefficient(activity) * weight_kg * duration_minutes as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_thirty_minutes_at_seventy_kilos() {
        assert_eq!(calculate_activity_calories("Corrida", 30, 70.0), 315);
    }

    #[test]
    fn unknown_activity_uses_walking_coefficient() {
        let unknown = calculate_activity_calories("Escalada", 40, 80.0);
        let walking = calculate_activity_calories("Caminhada", 40, 80.0);
        assert_eq!(unknown, walking);
        assert_eq!(unknown, (0.05f64 * 80.0 * 40.0).round() as i64);
    }

    #[test]
    fn result_is_rounded_not_truncated() {
        // 0.09 * 71 * 11 = 70.29 -> 70; 0.11 * 73 * 13 = 104.39 -> 104
        assert_eq!(calculate_activity_calories("Musculação", 11, 71.0), 70);
        // 0.14 * 65 * 25 = 227.5 -> rounds half away from zero to 228
        assert_eq!(calculate_activity_calories("Natação", 25, 65.0), 228);
    }
}
