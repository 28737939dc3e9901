//! Device-tier rendering budgets, resolved once per resize.

use nexum_core::{DeviceTier, RenderOptions, Viewport};

/// Highest device-pixel-ratio honored on constrained devices.
pub const CONSTRAINED_DPR_CAP: f32 = 1.25;
/// Highest device-pixel-ratio honored on full devices.
pub const FULL_DPR_CAP: f32 = 2.0;

/// What a renderer may spend on one device tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBudget {
    pub particles: usize,
    pub glow_spots: usize,
    /// Zero disables links.
    pub max_link_distance: f32,
    pub link_cap: Option<usize>,
    pub grain: bool,
}

/// Budgets for both tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budgets {
    pub full: TierBudget,
    pub constrained: TierBudget,
}

impl Budgets {
    pub fn for_tier(&self, tier: DeviceTier) -> &TierBudget {
        match tier {
            DeviceTier::Full => &self.full,
            DeviceTier::Constrained => &self.constrained,
        }
    }
}

/// Everything tier-dependent, computed once per resize and threaded through a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub tier: DeviceTier,
    pub particle_count: usize,
    pub glow_spot_count: usize,
    pub max_link_distance: f32,
    pub link_cap: Option<usize>,
    pub grain: bool,
    /// Keep scheduling frames; otherwise draw one static frame per resize.
    pub looping: bool,
    pub dpr_cap: f32,
}

impl RenderConfig {
    /// Resolve the budget for a viewport, applying page overrides.
    ///
    /// Overrides replace the full-tier values; on constrained devices they
    /// can only lower the budget.
    pub fn resolve(budgets: &Budgets, viewport: &Viewport, options: &RenderOptions) -> Self {
        let tier = viewport.tier(options.breakpoint);
        let budget = budgets.for_tier(tier);

        let particle_count = match (tier, options.particle_count) {
            (_, None) => budget.particles,
            (DeviceTier::Full, Some(n)) => n,
            (DeviceTier::Constrained, Some(n)) => n.min(budget.particles),
        };
        let max_link_distance = match (tier, options.max_link_distance) {
            (_, None) => budget.max_link_distance,
            (DeviceTier::Full, Some(d)) => d.max(0.0),
            (DeviceTier::Constrained, Some(d)) => d.max(0.0).min(budget.max_link_distance),
        };

        Self {
            tier,
            particle_count,
            glow_spot_count: budget.glow_spots,
            max_link_distance,
            link_cap: budget.link_cap,
            grain: budget.grain,
            looping: tier == DeviceTier::Full,
            dpr_cap: match tier {
                DeviceTier::Full => FULL_DPR_CAP,
                DeviceTier::Constrained => CONSTRAINED_DPR_CAP,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGETS: Budgets = Budgets {
        full: TierBudget {
            particles: 110,
            glow_spots: 0,
            max_link_distance: 190.0,
            link_cap: None,
            grain: true,
        },
        constrained: TierBudget {
            particles: 32,
            glow_spots: 0,
            max_link_distance: 120.0,
            link_cap: Some(2),
            grain: false,
        },
    };

    #[test]
    fn test_full_tier() {
        let config = RenderConfig::resolve(
            &BUDGETS,
            &Viewport::new(1920.0, 1080.0, 1.0),
            &RenderOptions::default(),
        );
        assert_eq!(config.tier, DeviceTier::Full);
        assert_eq!(config.particle_count, 110);
        assert_eq!(config.max_link_distance, 190.0);
        assert_eq!(config.link_cap, None);
        assert!(config.grain);
        assert!(config.looping);
        assert_eq!(config.dpr_cap, FULL_DPR_CAP);
    }

    #[test]
    fn test_constrained_tier() {
        let config = RenderConfig::resolve(
            &BUDGETS,
            &Viewport::new(375.0, 667.0, 3.0),
            &RenderOptions::default(),
        );
        assert_eq!(config.tier, DeviceTier::Constrained);
        assert_eq!(config.particle_count, 32);
        assert_eq!(config.link_cap, Some(2));
        assert!(!config.grain);
        assert!(!config.looping);
        assert_eq!(config.dpr_cap, CONSTRAINED_DPR_CAP);
    }

    #[test]
    fn test_overrides_cannot_raise_constrained_budget() {
        let options = RenderOptions::default()
            .with_particle_count(500)
            .with_max_link_distance(400.0);
        let wide = RenderConfig::resolve(&BUDGETS, &Viewport::new(1280.0, 800.0, 1.0), &options);
        assert_eq!(wide.particle_count, 500);
        assert_eq!(wide.max_link_distance, 400.0);

        let narrow = RenderConfig::resolve(&BUDGETS, &Viewport::new(400.0, 800.0, 1.0), &options);
        assert_eq!(narrow.particle_count, 32);
        assert_eq!(narrow.max_link_distance, 120.0);

        let fewer = RenderOptions::default().with_particle_count(5);
        let narrow = RenderConfig::resolve(&BUDGETS, &Viewport::new(400.0, 800.0, 1.0), &fewer);
        assert_eq!(narrow.particle_count, 5);
    }

    #[test]
    fn test_breakpoint_is_configurable() {
        let options = RenderOptions {
            breakpoint: 1024.0,
            ..RenderOptions::default()
        };
        let config = RenderConfig::resolve(&BUDGETS, &Viewport::new(900.0, 600.0, 1.0), &options);
        assert_eq!(config.tier, DeviceTier::Constrained);
    }
}
