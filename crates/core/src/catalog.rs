//! Activity Catalog: per-program activity templates used to seed new plans.
//!
//! Positions are significant: until persistence assigns identifiers, callers
//! correlate edits to activities by index, so the order returned by
//! [`template_for`] must be stable across calls. Static slices give that for
//! free. Hospitals and health centers currently share one catalog per
//! program; the lookup stays per-program so a per-facility-type split can be
//! introduced without touching callers.

use crate::program::Program;

/// A canonical activity template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTemplate {
    /// Activity name as it appears on the planning grid.
    pub activity: &'static str,
    /// Longer description shown alongside the name.
    pub description: &'static str,
}

const HIV_TEMPLATES: &[ActivityTemplate] = &[
    ActivityTemplate {
        activity: "Conduct supervision of community health workers",
        description: "Quarterly supervision visits to CHWs providing HIV services",
    },
    ActivityTemplate {
        activity: "Facilitate support groups for people living with HIV",
        description: "PLHIV support group meetings and peer education sessions",
    },
    ActivityTemplate {
        activity: "Trace patients lost to follow-up",
        description: "Home visits to return ART clients who missed appointments to care",
    },
    ActivityTemplate {
        activity: "Conduct HIV testing outreach campaigns",
        description: "Community testing events targeting high-risk populations",
    },
    ActivityTemplate {
        activity: "Provide enhanced adherence counseling",
        description: "Individual counseling sessions for clients with high viral load",
    },
    ActivityTemplate {
        activity: "Transport samples for viral load testing",
        description: "Sample referral from the facility to the reference laboratory",
    },
    ActivityTemplate {
        activity: "Hold quarterly coordination meetings",
        description: "Program review meetings with facility and district staff",
    },
];

const MALARIA_TEMPLATES: &[ActivityTemplate] = &[
    ActivityTemplate {
        activity: "Conduct home-based malaria case management",
        description: "CHW visits for community diagnosis and treatment of malaria",
    },
    ActivityTemplate {
        activity: "Distribute insecticide-treated nets",
        description: "Routine LLIN distribution to pregnant women and children under five",
    },
    ActivityTemplate {
        activity: "Carry out larval source management",
        description: "Identification and treatment of mosquito breeding sites",
    },
    ActivityTemplate {
        activity: "Conduct malaria awareness sessions",
        description: "Community sensitization on prevention and early treatment seeking",
    },
    ActivityTemplate {
        activity: "Supervise community health workers",
        description: "Monthly supervision of CHWs managing malaria cases",
    },
    ActivityTemplate {
        activity: "Hold monthly data review meetings",
        description: "Facility data quality and surveillance review",
    },
];

const TB_TEMPLATES: &[ActivityTemplate] = &[
    ActivityTemplate {
        activity: "Conduct TB contact tracing",
        description: "Screening of household contacts of bacteriologically confirmed cases",
    },
    ActivityTemplate {
        activity: "Transport sputum samples",
        description: "Sample referral for GeneXpert testing at the district laboratory",
    },
    ActivityTemplate {
        activity: "Support directly observed treatment",
        description: "DOT supporter follow-up for patients on treatment",
    },
    ActivityTemplate {
        activity: "Conduct TB screening in congregate settings",
        description: "Active case finding in prisons and mining sites",
    },
    ActivityTemplate {
        activity: "Hold quarterly cohort review meetings",
        description: "Treatment outcome review with district TB supervisors",
    },
];

/// The template list for a program, in stable catalog order.
pub fn template_for(program: Program) -> &'static [ActivityTemplate] {
    match program {
        Program::Hiv => HIV_TEMPLATES,
        Program::Malaria => MALARIA_TEMPLATES,
        Program::Tb => TB_TEMPLATES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_program_has_templates() {
        for program in Program::ALL {
            assert!(
                !template_for(program).is_empty(),
                "{program} catalog must not be empty"
            );
        }
    }

    #[test]
    fn order_is_stable_across_calls() {
        let first = template_for(Program::Hiv);
        let second = template_for(Program::Hiv);
        assert_eq!(first, second);
    }

    #[test]
    fn entries_have_nonempty_identity_fields() {
        for program in Program::ALL {
            for entry in template_for(program) {
                assert!(!entry.activity.is_empty());
                assert!(!entry.description.is_empty());
            }
        }
    }

    #[test]
    fn activity_names_are_unique_within_a_program() {
        for program in Program::ALL {
            let templates = template_for(program);
            for (i, a) in templates.iter().enumerate() {
                for b in &templates[i + 1..] {
                    assert_ne!(
                        a.activity, b.activity,
                        "duplicate activity name in {program} catalog"
                    );
                }
            }
        }
    }
}
