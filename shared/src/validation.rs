//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Uses both custom validators and the `validator` crate for derive macros.
//!
//! The scoring and BMI functions accept any non-negative input; the ranges
//! enforced here (0-7 days, height of at least half a metre, 1-5 intensity)
//! are applied at the request boundary before they are called.

/// Maximum days per week for any activity
pub const MAX_DAYS_PER_WEEK: u32 = 7;
/// Maximum minutes per day for any activity
pub const MAX_MINUTES_PER_DAY: u32 = 1440;
/// Maximum accepted body weight
pub const MAX_WEIGHT_KG: f64 = 500.0;
/// Minimum accepted height
pub const MIN_HEIGHT_M: f64 = 0.5;
/// Maximum accepted height
pub const MAX_HEIGHT_M: f64 = 3.0;
/// Largest BMI the `NUMERIC(6, 2)` column holds
///
/// `MAX_WEIGHT_KG / MIN_HEIGHT_M²` must stay below this.
pub const MAX_STORED_BMI: f64 = 9999.99;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Invalid email pattern: {}", e))?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a required free-text field
pub fn validate_required_text(value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Cannot be empty".to_string());
    }
    if value.chars().count() > max_len {
        return Err(format!("Must be at most {} characters", max_len));
    }
    Ok(())
}

/// Validate participant age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 120 {
        return Err("Age cannot exceed 120 years".to_string());
    }
    Ok(())
}

// ============================================================================
// Questionnaire Validation
// ============================================================================

/// Validate days per week (0-7)
pub fn validate_days_per_week(days: u32) -> Result<(), String> {
    if days > MAX_DAYS_PER_WEEK {
        return Err(format!("Days per week must be between 0 and {}", MAX_DAYS_PER_WEEK));
    }
    Ok(())
}

/// Validate minutes per day (0-1440)
pub fn validate_minutes_per_day(minutes: u32) -> Result<(), String> {
    if minutes > MAX_MINUTES_PER_DAY {
        return Err("Minutes per day cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate sitting hours per day (0-24)
pub fn validate_sitting_hours(hours: f64) -> Result<(), String> {
    if hours.is_nan() || hours.is_infinite() {
        return Err("Sitting hours must be a valid number".to_string());
    }
    if !(0.0..=24.0).contains(&hours) {
        return Err("Sitting hours must be between 0 and 24".to_string());
    }
    Ok(())
}

// ============================================================================
// Health Indicator Validation
// ============================================================================

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0 kg".to_string());
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(format!("Weight must be at most {} kg", MAX_WEIGHT_KG));
    }
    Ok(())
}

/// Validate height value (in meters)
pub fn validate_height_m(height_m: f64) -> Result<(), String> {
    if height_m.is_nan() || height_m.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_m < MIN_HEIGHT_M {
        return Err(format!("Height must be at least {} m", MIN_HEIGHT_M));
    }
    if height_m > MAX_HEIGHT_M {
        return Err(format!("Height must be at most {} m", MAX_HEIGHT_M));
    }
    Ok(())
}

/// Validate a blood pressure reading (mmHg)
pub fn validate_blood_pressure(systolic: u32, diastolic: u32) -> Result<(), String> {
    if !(50..=300).contains(&systolic) {
        return Err("Systolic pressure must be between 50 and 300 mmHg".to_string());
    }
    if !(30..=200).contains(&diastolic) {
        return Err("Diastolic pressure must be between 30 and 200 mmHg".to_string());
    }
    if diastolic >= systolic {
        return Err("Diastolic pressure must be lower than systolic pressure".to_string());
    }
    Ok(())
}

/// Validate barrier intensity (1-5)
pub fn validate_intensity(intensity: u32) -> Result<(), String> {
    if !(1..=5).contains(&intensity) {
        return Err("Intensity must be between 1 and 5".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "age" => "Age",
        "sex" => "Sex",
        "participant_type" => "Participant Type",
        "course" => "Course",
        "department" => "Department",
        "vigorous_days" => "Vigorous Activity Days",
        "vigorous_minutes" => "Vigorous Activity Minutes",
        "moderate_days" => "Moderate Activity Days",
        "moderate_minutes" => "Moderate Activity Minutes",
        "walking_days" => "Walking Days",
        "walking_minutes" => "Walking Minutes",
        "sitting_hours_weekday" => "Weekday Sitting Hours",
        "sitting_hours_weekend" => "Weekend Sitting Hours",
        "weight_kg" => "Weight",
        "height_m" => "Height",
        "systolic_pressure" => "Systolic Pressure",
        "diastolic_pressure" => "Diastolic Pressure",
        "blood_pressure" => "Blood Pressure",
        "category" => "Barrier Category",
        "description" => "Description",
        "intensity" => "Intensity",
        "title" => "Title",
        "strategy_type" => "Strategy Type",
        "target_audience" => "Target Audience",
        "implementation_timeline" => "Implementation Timeline",
        "owner" => "Owner",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }

    /// Pick the first failing field (alphabetically) from derive-based validation
    pub fn from_errors(errors: &validator::ValidationErrors) -> Option<Self> {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                    (field.to_string(), message)
                })
            })
            .collect();
        fields.sort();
        fields
            .into_iter()
            .next()
            .map(|(field, message)| Self::new(&field, &message))
    }
}

/// Run a field validator, attaching the field name to any failure
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|msg| ValidationError::new(field, &msg))
}
