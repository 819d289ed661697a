use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five task categories every plan week carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Upskill,
    Cv,
    Application,
    Networking,
    InterviewPrep,
}

impl TaskCategory {
    /// Classification order: the first category whose keywords match wins.
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Upskill,
        TaskCategory::Cv,
        TaskCategory::Application,
        TaskCategory::Networking,
        TaskCategory::InterviewPrep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Upskill => "upskill",
            TaskCategory::Cv => "cv",
            TaskCategory::Application => "application",
            TaskCategory::Networking => "networking",
            TaskCategory::InterviewPrep => "interview_prep",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown task category '{s}'"))
    }
}

/// One value per task category. Serializes as an object keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    pub upskill: T,
    pub cv: T,
    pub application: T,
    pub networking: T,
    pub interview_prep: T,
}

impl<T> CategoryMap<T> {
    /// Builds a map by calling `f` once per category, in classification order.
    pub fn from_fn(mut f: impl FnMut(TaskCategory) -> T) -> Self {
        CategoryMap {
            upskill: f(TaskCategory::Upskill),
            cv: f(TaskCategory::Cv),
            application: f(TaskCategory::Application),
            networking: f(TaskCategory::Networking),
            interview_prep: f(TaskCategory::InterviewPrep),
        }
    }

    pub fn get(&self, category: TaskCategory) -> &T {
        match category {
            TaskCategory::Upskill => &self.upskill,
            TaskCategory::Cv => &self.cv,
            TaskCategory::Application => &self.application,
            TaskCategory::Networking => &self.networking,
            TaskCategory::InterviewPrep => &self.interview_prep,
        }
    }

    pub fn get_mut(&mut self, category: TaskCategory) -> &mut T {
        match category {
            TaskCategory::Upskill => &mut self.upskill,
            TaskCategory::Cv => &mut self.cv,
            TaskCategory::Application => &mut self.application,
            TaskCategory::Networking => &mut self.networking,
            TaskCategory::InterviewPrep => &mut self.interview_prep,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        TaskCategory::ALL.into_iter().map(move |c| self.get(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlanWeek {
    /// 1-based week number.
    pub week: u8,
    pub tasks: CategoryMap<String>,
    pub completed: CategoryMap<bool>,
}

impl ActionPlanWeek {
    pub fn completed_count(&self) -> usize {
        self.completed.values().filter(|&&done| done).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count() == TaskCategory::ALL.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub weeks: Vec<ActionPlanWeek>,
}

impl ActionPlan {
    pub fn total_tasks(&self) -> usize {
        self.weeks.len() * TaskCategory::ALL.len()
    }

    pub fn completed_tasks(&self) -> usize {
        self.weeks.iter().map(ActionPlanWeek::completed_count).sum()
    }

    /// First week with an unfinished task; `None` once everything is done.
    pub fn current_week(&self) -> Option<u8> {
        self.weeks.iter().find(|w| !w.is_complete()).map(|w| w.week)
    }

    pub fn week_mut(&mut self, week: u8) -> Option<&mut ActionPlanWeek> {
        self.weeks.iter_mut().find(|w| w.week == week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in TaskCategory::ALL {
            assert_eq!(category.as_str().parse::<TaskCategory>().unwrap(), category);
        }
        assert!("cooking".parse::<TaskCategory>().is_err());
        assert_eq!(TaskCategory::InterviewPrep.to_string(), "interview_prep");
    }

    #[test]
    fn test_category_map_serializes_with_snake_case_keys() {
        let map = CategoryMap::from_fn(|c| c.as_str().len());
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["interview_prep"], 14);
        assert_eq!(value["cv"], 2);
    }

    #[test]
    fn test_week_completion_counts() {
        let mut week = ActionPlanWeek {
            week: 1,
            tasks: CategoryMap::default(),
            completed: CategoryMap::default(),
        };
        assert_eq!(week.completed_count(), 0);
        *week.completed.get_mut(TaskCategory::Cv) = true;
        assert_eq!(week.completed_count(), 1);
        assert!(!week.is_complete());
        week.completed = CategoryMap::from_fn(|_| true);
        assert!(week.is_complete());
    }
}
