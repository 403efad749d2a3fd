use super::super::domain::{Dependents, Employment, HealthStatus, IncomeRange};
use super::super::normalizer::ProfileSignals;
use super::premium::PremiumRange;
use super::{InsurancePlan, PlanKind};

pub(crate) fn health_plan(signals: &ProfileSignals) -> Option<InsurancePlan> {
    let mut match_score = 70;
    let mut priority = 4;

    match signals.health_status {
        Some(HealthStatus::ChronicConditions) => {
            match_score += 30;
            priority = 5;
        }
        Some(HealthStatus::MinorConditions) => match_score += 15,
        _ => {}
    }

    if signals.dependents.is_some_and(Dependents::is_large) {
        match_score += 10;
        priority += 1;
    }

    let premium = match signals.income_range {
        Some(income) if income.is_low() => PremiumRange::new(1500, 4000),
        Some(income) if income.is_top() => PremiumRange::new(5000, 15000),
        _ => PremiumRange::new(2500, 8000),
    };

    let why = if signals.health_status == Some(HealthStatus::ChronicConditions) {
        "Your health condition requires ongoing medical care. This plan covers hospital visits, \
         medication, and specialist consultations."
            .to_string()
    } else if let Some(dependents) = signals.dependents.filter(|d| *d != Dependents::None) {
        format!(
            "With {} depending on you, health coverage protects your family from unexpected \
             medical expenses.",
            dependents.label()
        )
    } else {
        "Health emergencies can happen anytime. This plan ensures you get quality care without \
         financial stress."
            .to_string()
    };

    Some(InsurancePlan::new(
        PlanKind::Health,
        why,
        premium,
        priority,
        match_score,
    ))
}

pub(crate) fn life_plan(signals: &ProfileSignals) -> Option<InsurancePlan> {
    let mut match_score = 60;
    let mut priority = 3;

    match signals.dependents {
        Some(Dependents::FiveOrMore) => {
            match_score += 40;
            priority = 5;
        }
        Some(Dependents::ThreeToFour) => {
            match_score += 30;
            priority = 4;
        }
        Some(Dependents::OneToTwo) => {
            match_score += 20;
            priority = 3;
        }
        _ => {}
    }

    let rider = signals.employment == Some(Employment::RiderDriver);
    if rider {
        match_score += 20;
        priority += 1;
    }

    let premium = if signals.income_range == Some(IncomeRange::Above500k) {
        PremiumRange::new(5000, 20000)
    } else {
        PremiumRange::new(1500, 5000)
    };

    let why = match signals.dependents {
        Some(dependents) if dependents.is_large() => format!(
            "With {} depending on you, life insurance ensures they're financially secure if \
             anything happens to you.",
            dependents.label()
        ),
        _ if rider => format!(
            "Your {} work carries daily risks. Life insurance protects your loved ones \
             financially.",
            Employment::RiderDriver.label()
        ),
        _ => "Life insurance gives you peace of mind knowing your family will be taken care of \
              financially."
            .to_string(),
    };

    Some(InsurancePlan::new(
        PlanKind::Life,
        why,
        premium,
        priority,
        match_score,
    ))
}

pub(crate) fn motor_plan(signals: &ProfileSignals) -> Option<InsurancePlan> {
    if !signals.owns_car {
        return None;
    }

    let (premium, priority, why) = if signals.employment == Some(Employment::RiderDriver) {
        (
            PremiumRange::new(8000, 25000),
            5,
            format!(
                "As a {}, your vehicle is your livelihood. Comprehensive motor insurance protects \
                 against accidents, theft, and third-party liability.",
                Employment::RiderDriver.label()
            ),
        )
    } else {
        (
            PremiumRange::new(5000, 15000),
            4,
            "You own a vehicle, so motor insurance is legally required and protects you against \
             accidents, theft, and third-party claims."
                .to_string(),
        )
    };

    Some(InsurancePlan::new(PlanKind::Motor, why, premium, priority, 90))
}

pub(crate) fn device_plan(signals: &ProfileSignals) -> Option<InsurancePlan> {
    let young = signals.age_range.is_some_and(|age| age.is_young());
    let (priority, match_score) = if young { (3, 70) } else { (2, 50) };

    Some(InsurancePlan::new(
        PlanKind::Device,
        "Your phone and devices are essential for work and communication. This plan covers \
         theft, damage, and screen repairs."
            .to_string(),
        PremiumRange::new(500, 2000),
        priority,
        match_score,
    ))
}

pub(crate) fn business_plan(signals: &ProfileSignals) -> Option<InsurancePlan> {
    let employment = signals.employment.filter(|e| e.runs_business())?;

    Some(InsurancePlan::new(
        PlanKind::Business,
        format!(
            "As a {}, your business is your income source. This plan protects your stock, \
             equipment, and workspace against fire, theft, and liability.",
            employment.label()
        ),
        PremiumRange::new(3000, 10000),
        4,
        85,
    ))
}
