//! Normalized column names.

pub const DIAGNOSIS: &str = "diagnosis";
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const LENGTH_OF_STAY: &str = "length_of_stay";
pub const BLOOD_PRESSURE: &str = "blood_pressure";
pub const BLOOD_SUGAR: &str = "blood_sugar";
pub const CHOLESTEROL: &str = "cholesterol";

pub const NAME: &str = "name";
pub const ROLE: &str = "role";
pub const DEPARTMENT: &str = "department";
pub const PATIENTS_ATTENDED: &str = "patients_attended";
pub const AVG_TREATMENT_SUCCESS: &str = "avg_treatment_success";

pub const TYPE: &str = "type";
pub const SUCCESS_RATE: &str = "success_rate";

pub const REVENUE: &str = "revenue";
pub const EXPENSES: &str = "expenses";
/// Derived: revenue minus expenses.
pub const PROFIT: &str = "profit";
