//! Read-only dashboard composition over already-normalized state.
//!
//! Nothing here persists: the dashboard re-normalizes Today on the way in
//! (so the daily rollover applies on every read), joins the active projects
//! to their primary links, and derives drift signals from loaded state.

use serde::Serialize;

use crate::hub::Hub;
use crate::state::projects::{MAX_ACTIVE, Project};
use crate::state::raw;
use crate::state::reality::Commitment;
use crate::state::resources::Section;
use crate::state::today::TodayItem;
use crate::state::week::{Anchors, WeekSlot};

/// An active project joined to its primary link.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveProject {
    pub id: String,
    pub key: String,
    pub focus: String,
    pub url: String,
}

/// Simple boolean drift signals. The last three are placeholders the
/// frontend renders but nothing computes yet.
#[derive(Debug, Clone, Serialize)]
pub struct Drift {
    pub too_many_outcomes: bool,
    pub too_many_projects: bool,
    pub consuming_gt_creating: bool,
    pub low_energy_3_days: bool,
    pub tool_tinkering: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub week_id: String,
    pub mode: String,
    pub outcomes: Vec<WeekSlot>,
    pub active_projects: Vec<ActiveProject>,
    pub blockers: Vec<WeekSlot>,
    pub anchors: Anchors,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodayView {
    pub date: String,
    pub top3: Vec<TodayItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RealityView {
    pub commitments: Vec<Commitment>,
}

/// The one-screen dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub week: WeekView,
    pub today: TodayView,
    pub reality: RealityView,
    pub projects: Vec<Project>,
    pub resources: Vec<Section>,
    pub drift: Drift,
}

/// Assemble the dashboard from the hub's normalized state.
pub fn dashboard(hub: &Hub) -> DashboardView {
    let today = hub.today();
    let week = hub.week();
    let projects = hub.projects();
    let resources = hub.resources();
    let reality = hub.reality();

    let active_projects: Vec<ActiveProject> = projects
        .active()
        .take(MAX_ACTIVE)
        .map(|p| ActiveProject {
            id: format!("ap_{}", p.key),
            key: p.key.clone(),
            focus: p
                .extra
                .get("focus")
                .map(raw::coerce_str)
                .unwrap_or_default(),
            url: p.primary_url().unwrap_or_default().to_string(),
        })
        .collect();

    let drift = Drift {
        too_many_outcomes: week.outcomes.len() > 3,
        too_many_projects: projects.active_count() > MAX_ACTIVE,
        consuming_gt_creating: false,
        low_energy_3_days: false,
        tool_tinkering: false,
    };

    DashboardView {
        week: WeekView {
            week_id: week.week_id,
            mode: week.mode,
            outcomes: week.outcomes,
            active_projects,
            blockers: week.blockers,
            anchors: week.anchors,
        },
        today: TodayView {
            date: today.date,
            top3: today.top3,
        },
        reality: RealityView {
            commitments: reality.commitments,
        },
        projects: projects.projects,
        resources: resources.sections.into_iter().take(3).collect(),
        drift,
    }
}
