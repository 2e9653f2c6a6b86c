//! Localized section headings and recommendation lines.

use wardstat::Recommendation;

/// Output language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            _ => Err(format!("Unknown locale: {}. Use en or ar.", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ar => write!(f, "ar"),
        }
    }
}

/// Text for one locale.
pub struct Labels {
    pub diagnosis_counts: &'static str,
    pub mean_length_of_stay: &'static str,
    pub workload: &'static str,
    pub needs_improvement: &'static str,
    pub low_profit: &'static str,
    pub recommendations: &'static str,
    pub increase_staffing: &'static str,
    pub improve_operations: &'static str,
    pub review_low_profit: &'static str,
    pub monitor_length_of_stay: &'static str,
    pub none: &'static str,
}

const EN: Labels = Labels {
    diagnosis_counts: "Most common diagnoses",
    mean_length_of_stay: "Average length of stay per diagnosis",
    workload: "Patients per department (workload)",
    needs_improvement: "Operations that need improvement",
    low_profit: "Least profitable departments",
    recommendations: "Hospital recommendations",
    increase_staffing: "Increase staff in the departments with the heaviest workload",
    improve_operations: "Improve protocols for operations with a low success rate",
    review_low_profit: "Re-evaluate the least profitable departments to cut expenses or raise revenue",
    monitor_length_of_stay: "Monitor and reduce length of stay for diagnoses with long stays to improve efficiency",
    none: "none",
};

const AR: Labels = Labels {
    diagnosis_counts: "الأمراض الأكثر شيوعًا",
    mean_length_of_stay: "متوسط مدة الإقامة لكل مرض",
    workload: "عدد المرضى لكل قسم (ضغط العمل)",
    needs_improvement: "العمليات التي تحتاج تحسين",
    low_profit: "الأقسام الأقل ربحًا",
    recommendations: "توصيات المستشفى",
    increase_staffing: "زيادة عدد الطاقم في الأقسام ذات ضغط العمل العالي",
    improve_operations: "تحسين بروتوكولات العمليات ذات معدل نجاح منخفض",
    review_low_profit: "إعادة تقييم الأقسام الأقل ربحًا لتقليل المصاريف أو زيادة الإيرادات",
    monitor_length_of_stay: "مراقبة مدة الإقامة وتقليلها للأمراض ذات مدة إقامة طويلة لتحسين الكفاءة",
    none: "لا يوجد",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Ar => &AR,
        }
    }

    /// One printable line for a recommendation.
    pub fn recommendation(self, rec: &Recommendation) -> String {
        let labels = self.labels();
        match rec {
            Recommendation::IncreaseStaffing { department } => format!(
                "- {}: {}",
                labels.increase_staffing,
                department.as_deref().unwrap_or(labels.none)
            ),
            Recommendation::ImproveOperations { types } => {
                format!("- {}: {}", labels.improve_operations, list(types, labels))
            }
            Recommendation::ReviewLowProfit { departments } => {
                format!("- {}: {}", labels.review_low_profit, list(departments, labels))
            }
            Recommendation::MonitorLengthOfStay => format!("- {}", labels.monitor_length_of_stay),
        }
    }
}

fn list(items: &[String], labels: &Labels) -> String {
    if items.is_empty() {
        labels.none.to_string()
    } else {
        items.join(", ")
    }
}
