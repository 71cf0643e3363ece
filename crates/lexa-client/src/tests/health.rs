use crate::health::{HealthReport, Readiness};

use googletest::assert_that;
use googletest::prelude::eq;

// =========================================================================
// Classification is a pure function of the two service flags
// =========================================================================

#[test]
fn given_both_services_up_when_classify_then_fully_ready() {
    assert_that!(Readiness::classify(true, true), eq(Readiness::FullyReady));
}

#[test]
fn given_one_service_up_when_classify_then_partially_ready() {
    assert_that!(
        Readiness::classify(true, false),
        eq(Readiness::PartiallyReady)
    );
    assert_that!(
        Readiness::classify(false, true),
        eq(Readiness::PartiallyReady)
    );
}

#[test]
fn given_no_services_up_when_classify_then_degraded() {
    assert_that!(Readiness::classify(false, false), eq(Readiness::Degraded));
}

#[test]
fn given_degraded_report_when_is_usable_then_false() {
    let report = HealthReport {
        readiness: Readiness::Degraded,
        gemini_enabled: false,
        mongodb_enabled: false,
        latency_ms: 12,
        status: 503,
    };

    assert!(!report.is_usable());
}

#[test]
fn given_partial_report_when_is_usable_then_true() {
    let report = HealthReport {
        readiness: Readiness::PartiallyReady,
        gemini_enabled: true,
        mongodb_enabled: false,
        latency_ms: 3,
        status: 200,
    };

    assert!(report.is_usable());
}
