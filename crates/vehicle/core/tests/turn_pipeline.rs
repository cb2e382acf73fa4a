//! End-to-end turn pipeline scenarios.
//!
//! These run a full vehicle through assembly, provider registration and
//! multiple turns, verifying the fixed phase order: power regeneration,
//! then drive friction and sustain cost, then issued effects in order,
//! then status ticks and expiry, then per-turn counter resets.

use std::sync::Arc;

use vehicle_core::{
    Attribute, AttributeModifier, CapabilityFlags, CombatEffect, ComponentKind, DamageType,
    DriveState, EventLog, IssuedEffect, ModifierBlueprint, ModifierCategory, ModifierSource,
    PowerCoreState, ProvidedModifier, SimEvent, StatusEffectTemplate, TargetPrecision, TickBlueprint,
    TickKind, Vehicle, VehicleComponent,
};

fn battle_tank() -> Vehicle {
    let chassis = VehicleComponent::new(ComponentKind::Chassis, "hull", 100, 12)
        .with_capabilities(CapabilityFlags::ARMORED);
    let core = VehicleComponent::new(ComponentKind::PowerCore, "reactor", 30, 10)
        .with_power_core(PowerCoreState::new(50, 5))
        .with_capabilities(CapabilityFlags::POWERED | CapabilityFlags::ELECTRONIC);
    let drive = VehicleComponent::new(ComponentKind::Drive, "tracks", 40, 10)
        .with_drive(DriveState::new(2, 10, 4).with_speed(50))
        .with_capabilities(CapabilityFlags::MOBILE);
    let plating = VehicleComponent::new(ComponentKind::Armor, "reactive plating", 20, 10)
        .provides(ProvidedModifier::flat(
            ComponentKind::Chassis,
            Attribute::ArmorClass,
            4.0,
        ));

    let mut vehicle = Vehicle::assemble("battle tank", vec![chassis, core, drive, plating]);
    vehicle.initialize();
    vehicle
}

fn burning() -> Arc<StatusEffectTemplate> {
    Arc::new(
        StatusEffectTemplate::builder("burning")
            .duration(2)
            .tick(TickBlueprint::new(TickKind::Damage(DamageType::Thermal), 5))
            .build()
            .unwrap(),
    )
}

fn current_speed(vehicle: &Vehicle) -> i32 {
    let drive_id = vehicle.find_component(ComponentKind::Drive).unwrap();
    vehicle
        .component(drive_id)
        .unwrap()
        .drive()
        .unwrap()
        .current_speed()
}

#[test]
fn two_turn_battle_scenario() {
    let mut vehicle = battle_tank();
    let mut events = EventLog::new();

    // Provider registration already landed: 12 base + 4 plating.
    assert_eq!(vehicle.armor_class(), 16);
    assert_eq!(vehicle.health(), 100);
    assert_eq!(vehicle.current_energy(), 50);

    // ===== TURN 1: incoming fire and an ignition =====
    let salvo = vec![
        IssuedEffect::new(
            CombatEffect::Damage {
                amount: 20,
                damage_type: DamageType::Kinetic,
            },
            TargetPrecision::Auto,
        ),
        IssuedEffect::new(
            CombatEffect::ApplyStatus {
                template: burning(),
                applier: ModifierSource::Environment(1),
            },
            TargetPrecision::Auto,
        ),
    ];
    vehicle.run_turn(salvo, &mut events);

    // Regen clamps at max 50, then the drive pays its sustain:
    // friction (2 + 10×50/100)×2 = 14 → speed 36;
    // cost 4 + (2 + 10×36/100)×2 = 14 → energy 50 − 14 = 36.
    assert_eq!(current_speed(&vehicle), 36);
    assert_eq!(vehicle.current_energy(), 36);
    // 20 kinetic to the chassis, then the burn tick lands at end of turn.
    assert_eq!(vehicle.health(), 100 - 20 - 5);
    assert_eq!(vehicle.turn(), 1);

    // ===== TURN 2: quiet turn; the burn ticks once more and expires =====
    vehicle.run_turn(Vec::new(), &mut events);

    // Regen 36 + 5 = 41; friction 36 → 26 (loss 10); cost 4 + 4×2 = 12.
    assert_eq!(current_speed(&vehicle), 26);
    assert_eq!(vehicle.current_energy(), 29);
    assert_eq!(vehicle.health(), 70);
    assert!(events
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::StatusExpired { .. })));

    // ===== TURN 3: the burn is gone; health holds =====
    vehicle.run_turn(Vec::new(), &mut events);
    assert_eq!(vehicle.health(), 70);
}

#[test]
fn identical_inputs_produce_identical_event_streams() {
    let run = || {
        let mut vehicle = battle_tank();
        let mut events = EventLog::new();
        for _ in 0..4 {
            let effects = vec![
                IssuedEffect::new(
                    CombatEffect::Damage {
                        amount: 7,
                        damage_type: DamageType::Explosive,
                    },
                    TargetPrecision::Auto,
                ),
                IssuedEffect::new(
                    CombatEffect::ApplyStatus {
                        template: burning(),
                        applier: ModifierSource::Environment(1),
                    },
                    TargetPrecision::Auto,
                ),
            ];
            vehicle.run_turn(effects, &mut events);
        }
        (vehicle.health(), vehicle.current_energy(), events)
    };

    let (health_a, energy_a, events_a) = run();
    let (health_b, energy_b, events_b) = run();
    assert_eq!(health_a, health_b);
    assert_eq!(energy_a, energy_b);
    assert_eq!(events_a, events_b);
}

#[test]
fn routed_status_modifies_the_drive_next_turn() {
    let mut vehicle = battle_tank();
    let mut events = EventLog::new();

    // Oil slick doubles drag; Auto routing sends it to the drive because
    // its first blueprint targets a locomotion attribute.
    let oil_slick = Arc::new(
        StatusEffectTemplate::builder("oil slick")
            .duration(3)
            .modifier(ModifierBlueprint::multiplier(Attribute::Drag, 2.0))
            .build()
            .unwrap(),
    );
    let drive_id = vehicle.find_component(ComponentKind::Drive).unwrap();

    vehicle.run_turn(
        vec![IssuedEffect::new(
            CombatEffect::ApplyStatus {
                template: oil_slick,
                applier: ModifierSource::Environment(2),
            },
            TargetPrecision::Auto,
        )],
        &mut events,
    );
    assert!(vehicle
        .component(drive_id)
        .unwrap()
        .entity()
        .active_statuses()
        .iter()
        .any(|s| s.template().name() == "oil slick"));
    // Turn 1 friction ran before the slick was applied: 50 → 36.
    assert_eq!(current_speed(&vehicle), 36);

    // Turn 2 friction sees drag 20: (2 + 20×36/100)×2 = 18 → speed 18.
    vehicle.run_turn(Vec::new(), &mut events);
    assert_eq!(current_speed(&vehicle), 18);
}

#[test]
fn energy_drain_tick_empties_the_reactor_pool() {
    let mut vehicle = battle_tank();
    let mut events = EventLog::new();
    let core_id = vehicle.power_core().unwrap();

    let parasite = Arc::new(
        StatusEffectTemplate::builder("power leech")
            .duration(3)
            .requires(CapabilityFlags::POWERED)
            .tick(TickBlueprint::new(TickKind::EnergyDrain, 30))
            .build()
            .unwrap(),
    );
    let attach = IssuedEffect::new(
        CombatEffect::ApplyStatus {
            template: parasite,
            applier: ModifierSource::Environment(3),
        },
        TargetPrecision::Precise,
    )
    .at(core_id);

    // Turn 1: sustain cost 14 (energy 36), then the leech bites for 30 → 6.
    vehicle.run_turn(vec![attach], &mut events);
    assert_eq!(vehicle.current_energy(), 6);

    // Turn 2: regen to 11; sustain wants 12 and is refused, so the drive
    // coasts: friction 36 → 26, then 25% decay → 20. Leech then empties
    // the pool.
    vehicle.run_turn(Vec::new(), &mut events);
    assert_eq!(current_speed(&vehicle), 20);
    assert_eq!(vehicle.current_energy(), 0);
    assert!(events
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::PowerDrawRejected { .. })));
}

#[test]
fn capability_gate_holds_through_the_router() {
    let mut vehicle = battle_tank();
    let mut events = EventLog::new();
    let chassis_id = vehicle.chassis().unwrap();

    // The leech needs a powered target; the chassis is not one.
    let parasite = Arc::new(
        StatusEffectTemplate::builder("power leech")
            .duration(3)
            .requires(CapabilityFlags::POWERED)
            .tick(TickBlueprint::new(TickKind::EnergyDrain, 30))
            .build()
            .unwrap(),
    );
    let attach = IssuedEffect::new(
        CombatEffect::ApplyStatus {
            template: parasite,
            applier: ModifierSource::Environment(3),
        },
        TargetPrecision::Precise,
    )
    .at(chassis_id);
    vehicle.run_turn(vec![attach], &mut events);

    assert!(events
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::StatusRejected { .. })));
    assert!(vehicle
        .component(chassis_id)
        .unwrap()
        .entity()
        .active_statuses()
        .is_empty());
}

#[test]
fn turn_draw_cap_resets_each_turn() {
    let chassis = VehicleComponent::new(ComponentKind::Chassis, "hull", 100, 12);
    let core = VehicleComponent::new(ComponentKind::PowerCore, "reactor", 30, 10)
        .with_power_core(PowerCoreState::new(100, 0).with_turn_draw_cap(20));
    let mut vehicle = Vehicle::assemble("capped rig", vec![chassis, core]);
    vehicle.initialize();
    let core_id = vehicle.power_core().unwrap();
    let mut events = EventLog::new();

    // Weapon systems pull against the cap within one turn.
    assert!(vehicle
        .component_mut(core_id)
        .unwrap()
        .draw_power(15, &mut events)
        .is_ok());
    assert!(vehicle
        .component_mut(core_id)
        .unwrap()
        .draw_power(15, &mut events)
        .is_err());
    assert_eq!(vehicle.current_energy(), 85);

    // End of turn resets the counter; the same draw now succeeds.
    vehicle.end_turn(&mut events);
    assert!(vehicle
        .component_mut(core_id)
        .unwrap()
        .draw_power(15, &mut events)
        .is_ok());
    assert_eq!(vehicle.current_energy(), 70);
}

#[test]
fn hull_breach_opens_internal_targets_mid_battle() {
    let chassis = VehicleComponent::new(ComponentKind::Chassis, "hull", 100, 12);
    let core = VehicleComponent::new(ComponentKind::PowerCore, "reactor", 30, 10)
        .with_power_core(PowerCoreState::new(50, 5))
        .with_internal_exposure(0.4)
        .with_capabilities(CapabilityFlags::POWERED);
    let mut vehicle = Vehicle::assemble("sealed rig", vec![chassis, core]);
    vehicle.initialize();
    let core_id = vehicle.power_core().unwrap();
    let chassis_id = vehicle.chassis().unwrap();
    let mut events = EventLog::new();

    assert!(!vehicle.is_component_accessible(core_id));

    // Precise fire at the sealed reactor still resolves (routing is total);
    // the accessibility query is advisory for the targeting layer above.
    vehicle.run_turn(
        vec![IssuedEffect::new(
            CombatEffect::Damage {
                amount: 45,
                damage_type: DamageType::Kinetic,
            },
            TargetPrecision::Auto,
        )],
        &mut events,
    );
    assert_eq!(vehicle.health(), 55);

    // 45% chassis damage clears the 40% threshold.
    assert!(vehicle.is_component_accessible(core_id));

    // Destroying the reactor triggers its cascade: pool zeroed, vehicle
    // alive but powerless.
    vehicle.damage_component(core_id, 999, DamageType::Explosive, &mut events);
    assert_eq!(vehicle.current_energy(), 0);
    assert!(!vehicle.is_destroyed());
    assert!(events
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::EnergyZeroed { .. })));

    // And the chassis cascade still ends the vehicle.
    vehicle.damage_component(chassis_id, 999, DamageType::Explosive, &mut events);
    assert!(vehicle.is_destroyed());
    assert!(events
        .events()
        .iter()
        .any(|e| matches!(e, SimEvent::VehicleDestroyed { .. })));
}
