//! crates/gym_trainer_core/src/advice.rs
//!
//! The advice cluster: macro arithmetic, prompt rendering, model-reply
//! validation, and the deterministic fallback templates. Everything in this
//! module is pure and synchronous; the orchestration that wires it to the
//! database and the model lives in the `api` service.

use crate::domain::{AdvicePayload, MacroTargets, Profile};

//=========================================================================================
// Macro Calculator
//=========================================================================================

/// Daily macro targets derived from body weight: 2 g/kg protein, 3 g/kg
/// carbs, 1 g/kg fat, each rounded to one decimal place.
pub fn calculate_macros(weight_kg: f64) -> MacroTargets {
    MacroTargets {
        protein: round1(weight_kg * 2.0),
        carbs: round1(weight_kg * 3.0),
        fats: round1(weight_kg * 1.0),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whole-gram figure used inside template prose. The prose multipliers may
/// deviate from the calculator's (the bulking template quotes 2.2 g/kg); the
/// `macros` field of every payload still comes from `calculate_macros`.
fn prose_grams(weight_kg: f64, multiplier: f64) -> i64 {
    (weight_kg * multiplier).round() as i64
}

//=========================================================================================
// Prompt Builder
//=========================================================================================

const ADVICE_PROMPT_TEMPLATE: &str = r#"You are an expert fitness trainer and nutritionist. Provide response in this exact JSON format:

{
  "response": "Brief summary",
  "advice": "Detailed fitness advice",
  "workout_plan": ["exercise1", "exercise2", "exercise3"],
  "nutrition_tips": "Diet recommendations",
  "macros": {
    "protein": 150,
    "carbs": 200,
    "fats": 50
  }
}

User Profile: age {age}, height {height_cm} cm, weight {weight_kg} kg, sex {sex}, activity level {activity_level}, goal {goal}
User Question: {question}

Provide practical, science-based fitness advice. Respond with ONLY the JSON object."#;

/// Renders the fixed instruction prompt for the advice model, embedding the
/// profile's field values and the user's question verbatim.
///
/// Callers must hold a real profile; the chat orchestrator short-circuits to
/// the profile-incomplete payload before ever building a prompt.
pub fn build_advice_prompt(profile: &Profile, question: &str) -> String {
    ADVICE_PROMPT_TEMPLATE
        .replace("{age}", &profile.age.to_string())
        .replace("{height_cm}", &profile.height_cm.to_string())
        .replace("{weight_kg}", &profile.weight_kg.to_string())
        .replace("{sex}", &profile.sex)
        .replace("{activity_level}", &profile.activity_level)
        .replace("{goal}", &profile.goal)
        .replace("{question}", question)
}

//=========================================================================================
// Model-Reply Validator
//=========================================================================================

/// The ways a raw model reply can fail validation. Every variant routes the
/// chat orchestrator to the fallback generator.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("model returned empty text")]
    Empty,
    #[error("model reply does not start with a JSON object")]
    NotJson,
    #[error("model reply failed to parse: {0}")]
    Malformed(String),
    #[error("model reply contained an empty workout plan")]
    EmptyWorkoutPlan,
}

/// Validates the raw text returned by the advice model into a typed payload.
///
/// Markdown code fences are stripped first; the remaining text must begin
/// with `{` and deserialize into the full five-field shape. Field types are
/// checked by the deserialization itself, so a reply with `workout_plan` as a
/// string or a non-numeric macro value is rejected, not passed through.
pub fn validate_model_reply(raw: &str) -> Result<AdvicePayload, ReplyError> {
    if raw.trim().is_empty() {
        return Err(ReplyError::Empty);
    }

    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    if !cleaned.starts_with('{') {
        return Err(ReplyError::NotJson);
    }

    let payload: AdvicePayload =
        serde_json::from_str(cleaned).map_err(|e| ReplyError::Malformed(e.to_string()))?;

    if payload.workout_plan.is_empty() {
        return Err(ReplyError::EmptyWorkoutPlan);
    }

    Ok(payload)
}

//=========================================================================================
// Fallback Advice Generator
//=========================================================================================

const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_GOAL: &str = "General Fitness";

/// The payload returned when a user with no profile asks for advice. Distinct
/// from every keyword template; macros are zeroed because there is no stored
/// weight to derive them from.
pub fn profile_incomplete_advice() -> AdvicePayload {
    AdvicePayload {
        response: "Please complete your profile first to receive personalized fitness advice."
            .to_string(),
        advice: "Your profile helps me understand your age, fitness level, goals, and body \
                 composition to provide customized plans."
            .to_string(),
        workout_plan: vec![
            "Complete profile setup to unlock personalized training program".to_string(),
        ],
        nutrition_tips: "Profile information is essential for creating diet plans based on your \
                         metabolic needs"
            .to_string(),
        macros: MacroTargets {
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        },
    }
}

/// Deterministic, network-independent advice. This is the safety net under
/// every failure in the chat path, so it is total: any `(profile, message)`
/// pair yields a complete payload.
///
/// The message is matched against keyword sets in a fixed priority order and
/// the first match wins. The sets overlap ("lose weight and gain muscle"
/// matches both the cutting and bulking sets), so evaluation order decides.
pub fn fallback_advice(profile: Option<&Profile>, user_message: &str) -> AdvicePayload {
    let weight = profile.map_or(DEFAULT_WEIGHT_KG, |p| p.weight_kg);
    let goal = profile.map_or(DEFAULT_GOAL, |p| p.goal.as_str());

    let message = user_message.to_lowercase();

    let (response, advice, workout_plan, nutrition_tips) = if contains_any(
        &message,
        &["workout", "exercise", "train", "gym"],
    ) {
        strength_template(weight)
    } else if contains_any(&message, &["diet", "food", "nutrition", "eat"]) {
        nutrition_template(weight, goal)
    } else if contains_any(&message, &["weight loss", "fat loss", "lose weight"]) {
        cutting_template(weight)
    } else if contains_any(&message, &["muscle", "gain", "bulk", "size"]) {
        bulking_template(weight)
    } else {
        general_template(weight)
    };

    AdvicePayload {
        response,
        advice,
        workout_plan,
        nutrition_tips,
        macros: calculate_macros(weight),
    }
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

type Template = (String, String, Vec<String>, String);

fn strength_template(weight: f64) -> Template {
    (
        "Here's a balanced workout plan for your fitness goals".to_string(),
        "Focus on compound exercises with proper form. Progressive overload is key for \
         continuous improvement."
            .to_string(),
        vec![
            "Monday: Upper Body - Bench Press 3x8-10, Rows 3x8-10, Shoulder Press 3x10-12"
                .to_string(),
            "Tuesday: Lower Body - Squats 3x8-10, Deadlifts 3x5-8, Lunges 3x12".to_string(),
            "Wednesday: Rest or Active Recovery".to_string(),
            "Thursday: Upper Body - Pull-ups 3xAMRAP, Dips 3x10-12, Bicep Curls 3x12".to_string(),
            "Friday: Lower Body - Leg Press 4x12, Leg Curls 4x12, Calf Raises 4x15".to_string(),
            "Weekend: Cardio and Mobility".to_string(),
        ],
        format!(
            "Eat {}g protein daily. Time carbs around workouts. Stay hydrated with 3-4L water.",
            prose_grams(weight, 2.0)
        ),
    )
}

fn nutrition_template(weight: f64, goal: &str) -> Template {
    (
        "Nutrition advice for your fitness journey".to_string(),
        "Focus on whole foods, adequate protein, and proper meal timing around workouts."
            .to_string(),
        vec!["Combine proper nutrition with consistent training for best results".to_string()],
        format!(
            "For {}:\n\
             - Protein: {}g daily from chicken, fish, eggs, dairy\n\
             - Carbs: {}g from rice, potatoes, oats, fruits\n\
             - Fats: {}g from nuts, avocado, olive oil\n\
             - Meal frequency: 4-6 meals daily\n\
             - Hydration: 3-4 liters water minimum",
            goal,
            prose_grams(weight, 2.0),
            prose_grams(weight, 3.0),
            prose_grams(weight, 1.0)
        ),
    )
}

fn cutting_template(weight: f64) -> Template {
    (
        "Weight loss strategy with sustainable approach".to_string(),
        "Create a moderate calorie deficit through diet and exercise. Focus on protein to \
         preserve muscle."
            .to_string(),
        vec![
            "Monday: HIIT Cardio - 30min interval training".to_string(),
            "Tuesday: Strength Training - Full body compound exercises".to_string(),
            "Wednesday: Steady State Cardio - 45min moderate pace".to_string(),
            "Thursday: Strength Training - Different exercises from Tuesday".to_string(),
            "Friday: Active Recovery - Walking, stretching, mobility".to_string(),
            "Weekend: Rest or light activity".to_string(),
        ],
        format!(
            "Create 500-calorie deficit daily. Eat {}g protein. Focus on fiber-rich foods for \
             satiety.",
            prose_grams(weight, 2.0)
        ),
    )
}

fn bulking_template(weight: f64) -> Template {
    (
        "Muscle building program with progressive overload".to_string(),
        "Focus on compound lifts with progressive overload. Ensure calorie surplus with \
         adequate protein."
            .to_string(),
        vec![
            "Monday: Chest & Triceps - Heavy pressing movements".to_string(),
            "Tuesday: Back & Biceps - Pulling movements".to_string(),
            "Wednesday: Legs & Core - Squats, deadlifts, accessories".to_string(),
            "Thursday: Shoulders & Arms - Overhead press and isolation".to_string(),
            "Friday: Weak Points - Address lagging muscle groups".to_string(),
            "Weekend: Rest and recovery".to_string(),
        ],
        format!(
            "Eat 300-500 calorie surplus. Protein: {}g daily. Carbs around workouts for energy.",
            prose_grams(weight, 2.2)
        ),
    )
}

fn general_template(weight: f64) -> Template {
    (
        "Comprehensive fitness guidance".to_string(),
        "Consistency in training and nutrition is the foundation of success. Focus on \
         progressive improvement."
            .to_string(),
        vec![
            "Monday: Strength Training - Compound exercises 3-4 sets".to_string(),
            "Tuesday: Cardiovascular Training - 30-45 minutes".to_string(),
            "Wednesday: Active Recovery - Mobility and flexibility".to_string(),
            "Thursday: Hypertrophy Training - 8-12 rep range".to_string(),
            "Friday: Full Body Metabolic Conditioning".to_string(),
            "Weekend: Rest or recreational activities".to_string(),
        ],
        format!(
            "Balanced macronutrients: Protein {}g, Carbs {}g, Fats {}g daily",
            prose_grams(weight, 2.0),
            prose_grams(weight, 3.0),
            prose_grams(weight, 1.0)
        ),
    )
}

//=========================================================================================
// Tests
//=========================================================================================
