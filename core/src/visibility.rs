//! Note window visibility decision
//!
//! Decides whether the note window is shown and which body it carries from
//! the live host signals. [`resolve`] is pure; the session calls it again on
//! every toggle, lifecycle event and note edit and keeps only the last result.

use crate::notes::{ZoneMap, ZoneNoteStore};

/// Signals feeding the visibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityInputs {
    pub global_enabled: bool,
    pub logged_in: bool,
    pub window_locked: bool,
    pub hide_outside_combat: bool,
    pub in_combat: bool,
    pub zone_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityResult {
    pub shown: bool,
    pub body: String,
}

impl VisibilityResult {
    fn hidden() -> Self {
        Self::default()
    }
}

/// Resolve window visibility and note body.
///
/// Rules short-circuit in order:
/// 1. Disabled globally or logged out: hidden, no body
/// 2. Unlocked window: always shown, body only for enabled zones
/// 3. Locked window on an unconfigured or disabled zone: hidden, no body
/// 4. Locked on an enabled zone: hidden outside combat if requested, the
///    body is still resolved
pub fn resolve(inputs: &VisibilityInputs, zones: &ZoneMap) -> VisibilityResult {
    if !inputs.global_enabled || !inputs.logged_in {
        return VisibilityResult::hidden();
    }

    let enabled_body = || {
        zones
            .zone(inputs.zone_id)
            .filter(|settings| settings.enabled)
            .and_then(|settings| settings.active_note())
            .map(|note| note.body.clone())
    };

    if !inputs.window_locked {
        return VisibilityResult {
            shown: true,
            body: enabled_body().unwrap_or_default(),
        };
    }

    let Some(body) = enabled_body() else {
        return VisibilityResult::hidden();
    };

    VisibilityResult {
        shown: !(inputs.hide_outside_combat && !inputs.in_combat),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonenotes_types::{Note, ZoneSettings};

    const ZONE: u32 = 992;
    const BODY: &str = "{t:00:30} raidwide\nspread";

    fn inputs() -> VisibilityInputs {
        VisibilityInputs {
            global_enabled: true,
            logged_in: true,
            window_locked: true,
            hide_outside_combat: false,
            in_combat: false,
            zone_id: ZONE,
        }
    }

    fn zones(enabled: bool) -> ZoneMap {
        let mut zones = ZoneMap::new();
        let mut settings = ZoneSettings::new(enabled);
        settings.notes.push(Note::with_body(BODY));
        settings.selected_note = 1;
        zones.insert(ZONE, settings);
        zones
    }

    fn all_inputs() -> Vec<VisibilityInputs> {
        let mut out = Vec::new();
        for bits in 0..64u32 {
            let bit = |n: u32| bits & (1 << n) != 0;
            out.push(VisibilityInputs {
                global_enabled: bit(0),
                logged_in: bit(1),
                window_locked: bit(2),
                hide_outside_combat: bit(3),
                in_combat: bit(4),
                zone_id: if bit(5) { ZONE } else { 1 },
            });
        }
        out
    }

    #[test]
    fn test_global_disable_always_hides() {
        for state in [ZoneMap::new(), zones(true), zones(false)] {
            for input in all_inputs().into_iter().filter(|i| !i.global_enabled) {
                assert_eq!(resolve(&input, &state), VisibilityResult::default());
            }
        }
    }

    #[test]
    fn test_logged_out_hides() {
        let input = VisibilityInputs {
            logged_in: false,
            window_locked: false,
            ..inputs()
        };
        assert_eq!(resolve(&input, &zones(true)), VisibilityResult::default());
    }

    #[test]
    fn test_unlocked_always_shown() {
        for state in [ZoneMap::new(), zones(true), zones(false)] {
            for input in all_inputs()
                .into_iter()
                .filter(|i| i.global_enabled && i.logged_in && !i.window_locked)
            {
                assert!(resolve(&input, &state).shown, "{:?}", input);
            }
        }
    }

    #[test]
    fn test_unlocked_body_only_for_enabled_zone() {
        let input = VisibilityInputs {
            window_locked: false,
            ..inputs()
        };
        assert_eq!(resolve(&input, &zones(true)).body, BODY);
        assert_eq!(resolve(&input, &zones(false)).body, "");
        assert_eq!(resolve(&input, &ZoneMap::new()).body, "");
    }

    #[test]
    fn test_locked_unconfigured_zone_hidden() {
        let result = resolve(&inputs(), &ZoneMap::new());
        assert!(!result.shown);
        assert_eq!(result.body, "");
    }

    #[test]
    fn test_locked_disabled_zone_hidden() {
        let result = resolve(&inputs(), &zones(false));
        assert!(!result.shown);
        assert_eq!(result.body, "");
    }

    #[test]
    fn test_locked_enabled_zone_shows_selected_note() {
        let result = resolve(&inputs(), &zones(true));
        assert!(result.shown);
        assert_eq!(result.body, BODY);
    }

    #[test]
    fn test_hide_outside_combat() {
        let out_of_combat = VisibilityInputs {
            hide_outside_combat: true,
            ..inputs()
        };
        let result = resolve(&out_of_combat, &zones(true));
        assert!(!result.shown);
        assert_eq!(result.body, BODY);

        let in_combat = VisibilityInputs {
            in_combat: true,
            ..out_of_combat
        };
        assert!(resolve(&in_combat, &zones(true)).shown);
    }

    #[test]
    fn test_deterministic() {
        let state = zones(true);
        for input in all_inputs() {
            assert_eq!(resolve(&input, &state), resolve(&input, &state));
        }
    }
}
