use carbonos_calculator::*;
use carbonos_estimator::{EstimatorAssumptions, ProductTier, ValidatedAssumptions};
use pretty_assertions::assert_eq;

#[test]
fn test_selectors_list_every_profile() {
    let industries: Vec<String> = industry_options().into_iter().map(|o| o.code).collect();
    assert_eq!(
        industries,
        vec!["manufacturing", "chemical", "steel", "textile", "electronics", "logistics"]
    );
    let regions: Vec<String> = region_options().into_iter().map(|o| o.code).collect();
    assert_eq!(regions, vec!["eu", "uk", "japan", "us", "none"]);
}

#[test]
fn test_full_page_flow_to_crm() {
    let mut session = CalculatorSession::new();
    assert_eq!(session.step, CalculatorStep::Input);

    session.set_industry("chemical");
    session.set_usage_text("5000");
    session.set_export_region("us");
    let panel = session.calculate().unwrap().clone();
    assert_eq!(panel.recommended_tier, "enterprise");
    assert_eq!(panel.tax_savings, "¥0");
    assert_eq!(panel.tax_exposure, "0%");
    assert_eq!(panel.green_power_revenue, "¥225,000");

    assert!(session.open_lead_capture());
    assert_eq!(session.step, CalculatorStep::LeadCapture);

    let mut sink = JsonLineSink::new(Vec::new());
    let lead = session
        .submit_lead(
            &LeadCaptureForm {
                name: "Chen Jie".into(),
                company: "Ningbo Coatings".into(),
                phone: "0574-8888-1234".into(),
                email: "chen.jie@ningbo-coatings.cn".into(),
            },
            &mut sink,
        )
        .unwrap();
    assert_eq!(session.step, CalculatorStep::Submitted);
    assert_eq!(lead.estimate.recommended_tier, ProductTier::Enterprise);

    let written = String::from_utf8(sink.into_inner()).unwrap();
    let value: serde_json::Value = serde_json::from_str(written.trim_end()).unwrap();
    assert_eq!(value["company"], "Ningbo Coatings");
    assert_eq!(value["input"]["industry_code"], "chemical");
    assert_eq!(value["estimate"]["recommended_tier"], "enterprise");
}

#[test]
fn test_invalid_usage_never_reaches_panel() {
    for usage in ["", "abc", "-10", "0", "inf"] {
        let mut session = CalculatorSession::new();
        session.set_industry("manufacturing");
        session.set_usage_text(usage);
        session.set_export_region("eu");
        assert!(session.calculate().is_err(), "{usage:?}");
        assert_eq!(session.panel, None);
        assert!(!session.open_lead_capture());
    }
}

#[test]
fn test_clamped_payback_is_displayed_at_cap() {
    let mut session = CalculatorSession::with_assumptions(ValidatedAssumptions::default());
    session.set_industry("logistics");
    session.set_usage_text("1");
    session.set_export_region("none");
    let panel = session.calculate().unwrap();
    assert_eq!(panel.payback_period, "10.0 years");
    assert!(panel.estimate.payback_is_capped());
}

#[test]
fn test_custom_assumptions_reach_the_panel() {
    let assumptions =
        EstimatorAssumptions::from_json_str(r#"{ "payback_display_cap_years": 5 }"#).unwrap();
    let mut session = CalculatorSession::with_assumptions(assumptions);
    session.set_industry("logistics");
    session.set_usage_text("1");
    session.set_export_region("none");
    assert_eq!(session.calculate().unwrap().payback_period, "5.0 years");
}
