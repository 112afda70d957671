#[cfg(test)]
mod tests {
    use glam::Vec2;

    use rampart_core::components::{Adaptive, Aura, Brood, DamageTracker, Enemy, Stealth};
    use rampart_core::enums::{EffectTag, EnemyArchetype};
    use rampart_core::types::EntityId;

    use crate::behaviors::*;
    use crate::profiles::get_profile;

    fn make_enemy(archetype: EnemyArchetype) -> Enemy {
        let profile = get_profile(archetype);
        Enemy {
            archetype,
            health: profile.max_health,
            max_health: profile.max_health,
            base_speed: profile.speed,
            slow_multiplier: 1.0,
            slow_remaining_secs: 0.0,
            aura_speed_bonus: 0.0,
            aura_armor_bonus: 0.0,
            progress: 0.0,
            segment: 0,
            reward: profile.reward,
            life_cost: profile.life_cost,
            wave: 1,
            radius: profile.radius,
        }
    }

    #[test]
    fn test_life_costs() {
        assert_eq!(get_profile(EnemyArchetype::Normal).life_cost, 1);
        assert!(get_profile(EnemyArchetype::Boss).life_cost > 1);
        assert!(get_profile(EnemyArchetype::Tank).life_cost > 1);
    }

    #[test]
    fn test_boss_capabilities() {
        let boss = get_profile(EnemyArchetype::Boss);
        assert!(boss.armor > 0.0);
        assert!(boss.immunities.contains(&EffectTag::Slow));
        assert!(boss.regen_per_sec > 0.0);
        assert!(boss.aura.is_some());
    }

    #[test]
    fn test_normal_has_no_capabilities() {
        let p = get_profile(EnemyArchetype::Normal);
        assert_eq!(p.armor, 0.0);
        assert_eq!(p.evasion, 0.0);
        assert!(p.immunities.is_empty());
        assert!(p.aura.is_none() && p.heal.is_none() && p.stealth.is_none());
        assert!(p.split.is_none() && p.brood.is_none() && p.adaptive.is_none());
    }

    #[test]
    fn test_slow_expires() {
        let mut e = make_enemy(EnemyArchetype::Normal);
        apply_slow(&mut e, 0.5, 1.0);
        assert!((current_speed(&e) - 30.0).abs() < 1e-4);

        for _ in 0..30 {
            tick_slow(&mut e, 1.0 / 60.0);
        }
        assert!(e.slow_multiplier < 1.0, "still slowed at 0.5s");

        for _ in 0..40 {
            tick_slow(&mut e, 1.0 / 60.0);
        }
        assert_eq!(e.slow_multiplier, 1.0);
        assert_eq!(e.slow_remaining_secs, 0.0);
    }

    #[test]
    fn test_weaker_slow_does_not_override() {
        let mut e = make_enemy(EnemyArchetype::Normal);
        apply_slow(&mut e, 0.3, 2.0);
        apply_slow(&mut e, 0.8, 0.5);
        assert!((e.slow_multiplier - 0.3).abs() < 1e-6);
        assert!((e.slow_remaining_secs - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_regeneration_clamps_to_max() {
        let mut e = make_enemy(EnemyArchetype::Boss);
        e.health = e.max_health - 1.0;
        let healed = regenerate(&mut e, 4.0, 1.0);
        assert!((healed - 1.0).abs() < 1e-4);
        assert_eq!(e.health, e.max_health);
    }

    #[test]
    fn test_dead_enemy_is_not_healed() {
        let mut e = make_enemy(EnemyArchetype::Normal);
        e.health = 0.0;
        assert_eq!(heal(&mut e, 10.0), 0.0);
        assert_eq!(e.health, 0.0);
    }

    #[test]
    fn test_aura_does_not_stack_or_self_buff() {
        let aura = Aura {
            radius: 100.0,
            speed_bonus: 0.15,
            armor_bonus: 0.1,
        };
        let weaker = Aura {
            radius: 100.0,
            speed_bonus: 0.05,
            armor_bonus: 0.2,
        };
        let sources = [
            AuraSource {
                owner: EntityId(1),
                position: Vec2::ZERO,
                aura,
            },
            AuraSource {
                owner: EntityId(2),
                position: Vec2::new(10.0, 0.0),
                aura: weaker,
            },
        ];

        let (speed, armor) = aura_bonus(EntityId(9), Vec2::new(50.0, 0.0), &sources);
        assert!((speed - 0.15).abs() < 1e-6);
        assert!((armor - 0.2).abs() < 1e-6);

        // Out of range of both.
        let (speed, armor) = aura_bonus(EntityId(9), Vec2::new(500.0, 0.0), &sources);
        assert_eq!((speed, armor), (0.0, 0.0));

        // The emitter itself only gets the other aura.
        let (speed, _) = aura_bonus(EntityId(1), Vec2::ZERO, &sources);
        assert!((speed - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_stealth_cycle() {
        let mut s = Stealth {
            hidden: false,
            timer: 1.0,
            hidden_secs: 2.0,
            visible_secs: 1.0,
        };
        assert!(!advance_stealth(&mut s, 0.5));
        assert!(advance_stealth(&mut s, 0.5));
        assert!(s.hidden);
        assert!((s.timer - 2.0).abs() < 1e-6);
        assert!(!advance_stealth(&mut s, 1.5));
        assert!(advance_stealth(&mut s, 0.6));
        assert!(!s.hidden);
    }

    #[test]
    fn test_adaptive_resistance_caps() {
        let mut a = Adaptive {
            counter: 0,
            per_hit: 0.03,
            cap: 0.5,
        };
        assert_eq!(adaptive_resistance(&a), 0.0);
        a.counter = 10;
        assert!((adaptive_resistance(&a) - 0.3).abs() < 1e-6);
        a.counter = 100;
        assert!((adaptive_resistance(&a) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_observe_damage_ignores_healing() {
        let mut t = DamageTracker { last_health: 100.0 };
        assert!((observe_damage(&mut t, 80.0) - 20.0).abs() < 1e-6);
        assert_eq!(observe_damage(&mut t, 90.0), 0.0);
        assert_eq!(t.last_health, 90.0);
    }

    #[test]
    fn test_brood_chance_proportional_to_damage() {
        let brood = Brood {
            minion: EnemyArchetype::Minion,
            chance_per_health: 1.5,
            burst: 3,
        };
        let small = brood_spawn_chance(&brood, 10.0, 140.0);
        let large = brood_spawn_chance(&brood, 40.0, 140.0);
        assert!(small > 0.0 && large > small);
        assert_eq!(brood_spawn_chance(&brood, 500.0, 140.0), 1.0);
        assert_eq!(brood_spawn_chance(&brood, 0.0, 140.0), 0.0);
    }
}
