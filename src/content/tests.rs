use super::ContentError;
use super::bosses::{BossCatalog, BossKind, MovePattern};
use super::levels::{LevelCatalog, LevelId};
use super::powers::{PowerCatalog, PowerKind};

#[test]
fn every_power_kind_has_a_default_definition() {
    let catalog = PowerCatalog::default();
    assert_eq!(catalog.len(), PowerKind::ALL.len());
    for kind in PowerKind::ALL {
        let def = catalog.get(kind).unwrap();
        assert_eq!(def.kind, kind);
        assert!(def.damage >= 1);
        assert!(def.cooldown > 0.0);
    }
}

#[test]
fn only_the_starting_power_starts_unlocked() {
    let catalog = PowerCatalog::default();
    assert_eq!(catalog.starting_powers(), vec![PowerKind::STARTING]);
}

#[test]
fn textual_lookup_accepts_ids_and_rejects_unknown() {
    let catalog = PowerCatalog::default();
    assert_eq!(catalog.lookup("waterball").unwrap().kind, PowerKind::Waterball);
    assert_eq!(catalog.lookup("Lightning").unwrap().kind, PowerKind::Lightning);
    assert_eq!(
        catalog.lookup("plasma").unwrap_err(),
        ContentError::UnknownPower("plasma".into())
    );
}

#[test]
fn reduced_catalog_reports_missing_power() {
    let full = PowerCatalog::default();
    let catalog = PowerCatalog::from_definitions([full.get(PowerKind::Fireball).unwrap().clone()]);
    assert_eq!(
        catalog.get(PowerKind::Waterball).unwrap_err(),
        ContentError::MissingPower(PowerKind::Waterball)
    );
}

#[test]
fn bosses_carry_data_for_their_pattern() {
    let catalog = BossCatalog::default();

    let water = catalog.get(BossKind::WaterDragon).unwrap();
    assert_eq!(water.pattern, MovePattern::Horizontal);
    assert!(water.motion.lane_x.is_some());

    let ice = catalog.get(BossKind::IceDragon).unwrap();
    assert_eq!(ice.pattern, MovePattern::Vertical);
    assert!(ice.motion.lane_y.is_some());

    let storm = catalog.get(BossKind::StormDragon).unwrap();
    assert_eq!(storm.pattern, MovePattern::Circular);
    assert!(storm.motion.circle.is_some());
}

#[test]
fn every_level_boss_and_reward_resolve() {
    let levels = LevelCatalog::default();
    let bosses = BossCatalog::default();
    let powers = PowerCatalog::default();

    for id in 1..=3 {
        let level = levels.get(LevelId(id)).unwrap();
        let boss = bosses.get(level.boss).unwrap();
        assert!(powers.get(boss.reward).is_ok());
        assert!(powers.get(boss.power).is_ok());
        assert!(level.end_platform().is_ok());
    }
    assert!(!levels.contains(LevelId(4)));
}

#[test]
fn encounter_threshold_sits_before_the_end_platform() {
    let levels = LevelCatalog::default();
    let level = levels.get(LevelId::FIRST).unwrap();
    assert_eq!(level.encounter_threshold(400.0).unwrap(), 1800.0);
}

#[test]
fn unknown_level_is_an_error() {
    let levels = LevelCatalog::default();
    assert_eq!(
        levels.get(LevelId(9)).unwrap_err(),
        ContentError::UnknownLevel(LevelId(9))
    );
}
