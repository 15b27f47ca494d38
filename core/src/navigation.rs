//! Drill-down navigation state machine.
//!
//! A `DashboardNavigator` owns BOTH halves of a dashboard's view state:
//! the active filter/tab and the drill-down trail. They only change through
//! the transitions below, so a filter or tab change always resets the
//! trail to overview.
//!
//! TRANSITION TABLE:
//!   overview          + Skill(id)      → skill(id)
//!   skill(s)          + Employee(e)    → employee(e, via s)
//!   overview          + Employee(e)    → employee(e)
//!   overview          + Reportees(m)   → reportees(m)
//!   employee(m)       + Reportees(m)   → reportees(m)
//!   any               + filter change  → overview
//!   any               + tab change     → overview
//!   any               + breadcrumb(i)  → trail[i]
//!   anything else                      → rejected, state unchanged
//!
//! A drill target missing from the filtered scope is "not found": the
//! navigator falls back to overview. A reportees target must be a people
//! manager in scope.
//!
//! The trail is a stack. Each drill pushes one state; breadcrumb i is
//! exactly the state that was pushed at depth i.

use crate::{
    filter::ProfileFilter,
    profile::{EmployeeProfile, ProfileSet},
    types::{EmployeeId, SkillId},
};
use serde::{Deserialize, Serialize};

// ── States and targets ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DrillDownState {
    Overview,
    Skill {
        skill_id: SkillId,
    },
    Employee {
        employee_id: EmployeeId,
        via_skill:   Option<SkillId>,
    },
    Reportees {
        manager_id: EmployeeId,
    },
}

impl DrillDownState {
    pub fn view(&self) -> DrillDownView {
        match self {
            Self::Overview => DrillDownView::Overview,
            Self::Skill { .. } => DrillDownView::Skill,
            Self::Employee { .. } => DrillDownView::Employee,
            Self::Reportees { .. } => DrillDownView::Reportees,
        }
    }

    pub fn selected_skill(&self) -> Option<&str> {
        match self {
            Self::Skill { skill_id } => Some(skill_id),
            Self::Employee { via_skill, .. } => via_skill.as_deref(),
            _ => None,
        }
    }

    pub fn selected_employee(&self) -> Option<&str> {
        match self {
            Self::Employee { employee_id, .. } => Some(employee_id),
            _ => None,
        }
    }

    pub fn selected_manager(&self) -> Option<&str> {
        match self {
            Self::Reportees { manager_id } => Some(manager_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDownView {
    Overview,
    Skill,
    Employee,
    Reportees,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DrillTarget {
    Skill(SkillId),
    Employee(EmployeeId),
    Reportees(EmployeeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillOutcome {
    Entered(DrillDownState),
    /// Target not in the filtered scope; navigator is back at overview.
    NotFound,
    /// Transition not allowed from the current view; state unchanged.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    Overview,
    SkillsReadiness,
    Redeployment,
    Leadership,
    CostAnalysis,
    Automation,
}

impl DashboardTab {
    pub fn section_label(&self) -> &'static str {
        match self {
            Self::Overview => "Workforce Overview",
            Self::SkillsReadiness => "Skills Readiness",
            Self::Redeployment => "Redeployment",
            Self::Leadership => "Leadership Pipeline",
            Self::CostAnalysis => "Cost Analysis",
            Self::Automation => "Automation Exposure",
        }
    }
}

// ── Breadcrumbs ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "depth", rename_all = "snake_case")]
pub enum BreadcrumbAction {
    /// Top-level section entry: back to overview.
    ResetToOverview,
    /// Return to the state at this trail depth.
    PopTo(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    /// `None` for the current (last) segment.
    pub on_activate: Option<BreadcrumbAction>,
}

// ── Navigator ────────────────────────────────────────────────────────────────

static OVERVIEW: DrillDownState = DrillDownState::Overview;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardNavigator {
    tab:    DashboardTab,
    filter: ProfileFilter,
    /// Never empty; trail[0] is always Overview.
    trail:  Vec<DrillDownState>,
}

impl DashboardNavigator {
    pub fn new(tab: DashboardTab) -> Self {
        Self {
            tab,
            filter: ProfileFilter::default(),
            trail: vec![DrillDownState::Overview],
        }
    }

    pub fn state(&self) -> &DrillDownState {
        self.trail.last().unwrap_or(&OVERVIEW)
    }

    pub fn trail(&self) -> &[DrillDownState] {
        &self.trail
    }

    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    pub fn filter(&self) -> &ProfileFilter {
        &self.filter
    }

    /// The filtered profiles this dashboard currently shows.
    pub fn scope<'a>(&self, profiles: &'a ProfileSet) -> Vec<&'a EmployeeProfile> {
        self.filter.apply(profiles)
    }

    fn reset(&mut self) {
        self.trail.truncate(1);
        if self.trail.is_empty() {
            self.trail.push(DrillDownState::Overview);
        }
    }

    pub fn change_filter(&mut self, filter: ProfileFilter) -> &DrillDownState {
        if filter != self.filter {
            log::debug!("Filter changed on {:?}; resetting drill-down", self.tab);
        }
        self.filter = filter;
        self.reset();
        self.state()
    }

    pub fn change_tab(&mut self, tab: DashboardTab) -> &DrillDownState {
        self.tab = tab;
        self.reset();
        self.state()
    }

    /// Apply a drill-down transition against the current filtered scope.
    pub fn drill_down(&mut self, target: DrillTarget, profiles: &ProfileSet) -> DrillOutcome {
        let next = match (self.state(), &target) {
            (DrillDownState::Overview, DrillTarget::Skill(skill_id)) => DrillDownState::Skill {
                skill_id: skill_id.clone(),
            },
            (DrillDownState::Skill { skill_id }, DrillTarget::Employee(employee_id)) => {
                DrillDownState::Employee {
                    employee_id: employee_id.clone(),
                    via_skill: Some(skill_id.clone()),
                }
            }
            (DrillDownState::Overview, DrillTarget::Employee(employee_id)) => DrillDownState::Employee {
                employee_id: employee_id.clone(),
                via_skill: None,
            },
            (DrillDownState::Overview, DrillTarget::Reportees(manager_id)) => DrillDownState::Reportees {
                manager_id: manager_id.clone(),
            },
            // From an employee view only that employee's own team is reachable.
            (DrillDownState::Employee { employee_id, .. }, DrillTarget::Reportees(manager_id))
                if employee_id == manager_id =>
            {
                DrillDownState::Reportees {
                    manager_id: manager_id.clone(),
                }
            }
            (current, _) => {
                log::debug!("Rejected drill-down {target:?} from {:?}", current.view());
                return DrillOutcome::Rejected;
            }
        };

        let scope = self.scope(profiles);
        let found = match &target {
            DrillTarget::Skill(skill_id) => scope.iter().any(|p| p.has_skill(skill_id)),
            DrillTarget::Employee(id) => scope.iter().any(|p| p.employee.employee_id == *id),
            DrillTarget::Reportees(id) => scope
                .iter()
                .any(|p| p.employee.employee_id == *id && p.employee.leadership.is_manager()),
        };
        if !found {
            log::debug!("Drill-down target {target:?} not in scope; back to overview");
            self.reset();
            return DrillOutcome::NotFound;
        }

        self.trail.push(next.clone());
        DrillOutcome::Entered(next)
    }

    /// Pop one level. No-op at overview.
    pub fn back(&mut self) -> &DrillDownState {
        if self.trail.len() > 1 {
            self.trail.pop();
        }
        self.state()
    }

    pub fn activate(&mut self, action: BreadcrumbAction) -> &DrillDownState {
        match action {
            BreadcrumbAction::ResetToOverview => self.reset(),
            BreadcrumbAction::PopTo(depth) => {
                if depth < self.trail.len() {
                    self.trail.truncate(depth + 1);
                }
            }
        }
        self.state()
    }

    /// Breadcrumb trail for the current state, labels resolved from the
    /// filtered scope. Unknown ids fall back to the raw id.
    pub fn breadcrumbs(&self, profiles: &ProfileSet) -> Vec<BreadcrumbItem> {
        let scope = self.scope(profiles);
        let last = self.trail.len() - 1;

        self.trail
            .iter()
            .enumerate()
            .map(|(depth, state)| {
                let label = match state {
                    DrillDownState::Overview => self.tab.section_label().to_string(),
                    DrillDownState::Skill { skill_id } => skill_label(&scope, skill_id),
                    DrillDownState::Employee { employee_id, .. } => employee_label(&scope, employee_id),
                    DrillDownState::Reportees { manager_id } => {
                        format!("{}'s Direct Reports", employee_label(&scope, manager_id))
                    }
                };
                let on_activate = if depth == last {
                    None
                } else if depth == 0 {
                    Some(BreadcrumbAction::ResetToOverview)
                } else {
                    Some(BreadcrumbAction::PopTo(depth))
                };
                BreadcrumbItem { label, on_activate }
            })
            .collect()
    }
}

fn skill_label(scope: &[&EmployeeProfile], skill_id: &str) -> String {
    scope
        .iter()
        .find_map(|p| p.skill(skill_id))
        .map(|s| s.name.clone())
        .unwrap_or_else(|| skill_id.to_string())
}

fn employee_label(scope: &[&EmployeeProfile], employee_id: &str) -> String {
    scope
        .iter()
        .find(|p| p.employee.employee_id == employee_id)
        .map(|p| p.employee.name.clone())
        .unwrap_or_else(|| employee_id.to_string())
}
