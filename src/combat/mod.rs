//! Combat system

pub mod analytics;
pub mod archetype;
pub mod boss;
pub mod combatant;
pub mod damage;
pub mod encounter;
pub mod resistance;
pub mod status;

pub use analytics::{DamageAnalytics, SkillInsight, Trend, ANALYTICS_WINDOW};
pub use archetype::{triangle_multiplier, Archetype};
pub use boss::{
    AbilityEffects, ActionReport, BossAbility, BossEncounter, BossPhase, BossRewards, BossStatus, PlayerAction,
    RoundReport,
};
pub use combatant::{ActiveWard, Combatant};
pub use damage::{base_damage, pre_crit_damage, resolve_attack, status_chance, AttackInput, AttackOutcome, DamageBreakdown};
pub use encounter::{create_encounter, Encounter, EncounterReward, EncounterState, TurnReport};
pub use resistance::{
    apply_resistance, can_apply_status, status_apply_chance, DamageType, EntityKind, ResistanceModifier,
    ResistanceProfile, ResistanceTarget, StatusKind,
};
pub use status::{ActiveStatus, StatusEffects, StatusTickResult};
