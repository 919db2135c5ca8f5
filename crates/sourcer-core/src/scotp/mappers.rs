//! Field mapping per ScotlandsPeople record-type code.

use std::sync::LazyLock;

use regex::Regex;
use sourcer_model::{
    NameValue, RecordSubtype, ScotpExtractedData, Spouse, collection_keys, extract_year_string,
};
use sourcer_normalization::{
    clean_dd_mm_yyyy_date, clean_dd_month_yyyy_date, is_dash_placeholder, non_empty,
    standardize_name, standardize_place_name, to_initial_caps_each_word,
};

use super::parents::{apply_parents, record_reference_parts};
use super::place::{PlaceResolver, lds_census_place};
use super::wills::apply_will_details;
use crate::builder::{RecordBuilder, date_value};

pub type ScotpMapper = fn(&ScotpExtractedData, &PlaceResolver<'_>, &mut RecordBuilder);

static FRAME_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FR\d").expect("Invalid frame number regex"));

const PARENTS_KEY: &str = "Parents/Other details";
const MOTHERS_MAIDEN_NAME_KEYS: &[&str] = &["Mother's Maiden Name", "Mothers Maiden Name"];

fn dd_mm(data: &ScotpExtractedData, key: &str) -> Option<String> {
    data.record_value(key).and_then(clean_dd_mm_yyyy_date)
}

fn dd_month(data: &ScotpExtractedData, key: &str) -> Option<String> {
    data.record_value(key).and_then(clean_dd_month_yyyy_date)
}

/// A record value that is neither blank nor a dash placeholder.
fn present(data: &ScotpExtractedData, key: &str) -> Option<String> {
    data.record_value(key)
        .filter(|value| !is_dash_placeholder(value))
        .and_then(non_empty)
}

fn set_event_date(builder: &mut RecordBuilder, date: Option<&str>) {
    builder.set_event_date(date, None);
}

fn set_court(
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
    court: Option<&str>,
    year: Option<&str>,
) {
    if let Some(court) = places.court(court, year) {
        builder.record_mut().court_name = court.court_name;
        builder.set_event_place(Some(court.place));
    }
}

/// The spouse of a marriage, married at the event date and place.
fn set_marriage(
    builder: &mut RecordBuilder,
    surname: Option<&str>,
    forenames: Option<&str>,
    is_full_name: bool,
) {
    let surname = surname.map(standardize_name).unwrap_or_default();
    let forenames = forenames.map(standardize_name).unwrap_or_default();
    let name = if is_full_name {
        NameValue::default().with_name(&surname)
    } else {
        NameValue::default()
            .with_forenames(&forenames)
            .with_last_name(&surname)
    };

    let record = builder.record_mut();
    record.spouses = vec![Spouse {
        name: name.non_empty(),
        marriage_date: record.event_date.clone(),
        marriage_place: record.event_place.clone(),
        age: None,
    }];
}

fn set_divorce(builder: &mut RecordBuilder, surname: Option<&str>, marriage_date: Option<&str>) {
    let surname = surname.map(standardize_name).unwrap_or_default();
    builder.record_mut().spouses = vec![Spouse {
        name: NameValue::default().with_last_name(&surname).non_empty(),
        marriage_date: date_value(marriage_date, None),
        ..Spouse::default()
    }];
}

fn statutory_common(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    let year = data.record_value("Year");
    builder.set_event_date(None, year);
    let rd_name = data.record_value("RD Name");
    builder.record_mut().registration_district = rd_name.and_then(non_empty);
    builder.set_event_place(Some(places.statutory_district(rd_name, year)));
}

fn opr_common(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
    date_key: &str,
) {
    let date = dd_mm(data, date_key);
    set_event_date(builder, date.as_deref());
    let year = date.as_deref().and_then(extract_year_string);
    builder.set_event_place(Some(
        places.opr_parish(data.record_value("Parish"), year.as_deref()),
    ));
}

fn mothers_maiden_name(data: &ScotpExtractedData) -> Option<String> {
    data.first_record_value(MOTHERS_MAIDEN_NAME_KEYS)
        .filter(|value| !is_dash_placeholder(value))
        .map(standardize_name)
        .and_then(|name| non_empty(&name))
}

fn subject_last_name(builder: &RecordBuilder) -> Option<String> {
    builder
        .record()
        .name
        .as_ref()
        .and_then(NameValue::last_name)
        .map(str::to_string)
}

pub fn stat_births(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    statutory_common(data, places, builder);
    let last_name = subject_last_name(builder);
    let record = builder.record_mut();
    record.last_name_at_birth = last_name;
    record.mothers_maiden_name = mothers_maiden_name(data);
    record.birth_place = record.event_place.clone();
    record.birth_date = record.event_date.clone();
}

pub fn stat_marriages(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    statutory_common(data, places, builder);
    set_marriage(
        builder,
        data.record_value("Spouse Surname"),
        data.record_value("Spouse Forename"),
        false,
    );
}

pub fn stat_deaths(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    statutory_common(data, places, builder);
    let last_name = subject_last_name(builder);
    let record = builder.record_mut();
    record.last_name_at_death = last_name;
    record.mothers_maiden_name = mothers_maiden_name(data);
    record.age_at_death = data.record_value("Age at death").and_then(non_empty);
    record.death_place = record.event_place.clone();
    record.death_date = record.event_date.clone();
}

pub fn stat_divorces(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    let year = data.record_value("Divorce Year");
    builder.set_event_date(None, year);
    let marriage_date = dd_mm(data, "Marriage Date");
    set_divorce(
        builder,
        data.record_value("Spouse Surname"),
        marriage_date.as_deref(),
    );
    set_court(places, builder, data.record_value("Court"), year);
}

pub fn stat_civil_partnerships(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    statutory_common(data, places, builder);
    set_marriage(builder, data.record_value("Partner Surname"), None, false);
}

pub fn stat_dissolutions(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    let year = data.record_value("Dissolution Year");
    builder.set_event_date(None, year);
    let partnership_date = data
        .first_record_value(&["Civil Partnership Date", "Partnership Date"])
        .and_then(clean_dd_mm_yyyy_date);
    set_divorce(
        builder,
        data.record_value("Partner Surname"),
        partnership_date.as_deref(),
    );
    set_court(places, builder, data.record_value("Court"), year);
}

pub fn census(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    builder.set_event_date(None, data.record_value("Year"));
    let rd_name = data.record_value("RD Name");
    let record = builder.record_mut();
    record.age_at_event = data.record_value("Age at census").and_then(non_empty);
    record.registration_district = rd_name.and_then(non_empty);
    builder.set_event_place(Some(
        places.census_district(rd_name, data.record_value("County / City")),
    ));
}

pub fn census_lds(data: &ScotpExtractedData, _: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    builder.set_event_date(None, data.record_value("Year"));
    builder.record_mut().age_at_event = data.record_value("Age at census").and_then(non_empty);
    builder.set_event_place(Some(lds_census_place(
        data.record_value("Census Place"),
        data.record_value("Address"),
    )));
    builder.set_birth_place(data.record_value("Birth Place"));
}

pub fn opr_births(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    opr_common(data, places, builder, "Birth Date");
    apply_parents(data, PARENTS_KEY, false, builder);
}

pub fn opr_deaths(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    opr_common(data, places, builder, "Date");
    builder.record_mut().age_at_death = data.record_value("Age").and_then(non_empty);
    apply_parents(data, PARENTS_KEY, true, builder);
}

pub fn opr_marriages(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    opr_common(data, places, builder, "Date");
    builder.record_mut().record_subtype = Some(RecordSubtype::MarriageOrBanns);

    let spouse_field = data.record_value("Spouse Name").unwrap_or_default();
    let (spouse_name, remainder) = match spouse_field.find('/') {
        Some(index) => spouse_field.split_at(index),
        None => (spouse_field, ""),
    };
    if !spouse_name.trim().is_empty()
        && spouse_name != "-----"
        && !spouse_name.starts_with("NAME NOT GIVEN")
    {
        set_marriage(builder, Some(spouse_name), None, true);
    }

    if let Some(found) = FRAME_NUMBER.find(remainder) {
        record_reference_parts(
            remainder[found.start()..].trim(),
            "FR",
            collection_keys::FRAME_NUMBER,
            builder,
        );
    }
}

pub fn cr_banns(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    builder.record_mut().record_subtype = Some(RecordSubtype::MarriageOrBanns);
    set_event_date(builder, dd_mm(data, "Date").as_deref());
    builder.set_event_place(Some(places.rc_congregation(data.record_value("Parish"))));
    set_marriage(
        builder,
        data.record_value("Spouse Surname"),
        data.record_value("Spouse Forename"),
        false,
    );
}

pub fn cr_baptisms(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    let birth = dd_mm(data, "Birth Date");
    let baptism = dd_mm(data, "Baptism Date");
    set_event_date(builder, baptism.as_deref().or(birth.as_deref()));
    builder.set_birth_date(birth.as_deref(), None);
    builder.set_event_place(Some(places.rc_congregation(data.record_value("Parish"))));
    apply_parents(data, PARENTS_KEY, false, builder);
}

pub fn cr_burials(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    let death = dd_mm(data, "Death Date");
    let burial = dd_mm(data, "Burial Date");
    set_event_date(builder, burial.as_deref().or(death.as_deref()));
    builder.set_death_date(death.as_deref(), None);
    builder.record_mut().age_at_death = data.record_value("Age").and_then(non_empty);
    builder.set_event_place(Some(places.rc_congregation(data.record_value("Parish"))));
}

pub fn cr_other(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_mm(data, "Event Date").as_deref());
    builder.set_event_place(Some(places.rc_congregation(data.record_value("Parish"))));
}

fn other_church_place(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    builder.set_event_place(Some(
        places.other_congregation(data.record_value("Parish/Congregation Name")),
    ));
}

pub fn ch3_baptisms(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    let birth = dd_month(data, "Birth Date");
    let baptism = dd_month(data, "Baptism Date");
    set_event_date(builder, baptism.as_deref().or(birth.as_deref()));
    builder.set_birth_date(birth.as_deref(), None);
    other_church_place(data, places, builder);
    let record = builder.record_mut();
    record.birth_place = record.event_place.clone();
    apply_parents(data, PARENTS_KEY, false, builder);
}

pub fn ch3_burials(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    set_event_date(builder, dd_month(data, "Date").as_deref());
    other_church_place(data, places, builder);
    let record = builder.record_mut();
    record.cause_of_death =
        present(data, "Cause of Death").map(|cause| to_initial_caps_each_word(&cause));
    record.death_place = record.event_place.clone();
}

pub fn ch3_banns(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_month(data, "Marriage Date").as_deref());
    other_church_place(data, places, builder);
    set_marriage(
        builder,
        data.record_value("Spouse Surname"),
        data.record_value("Spouse Forename"),
        false,
    );
}

pub fn ch3_other(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_month(data, "Date of Event").as_deref());
    other_church_place(data, places, builder);
}

pub fn coa(data: &ScotpExtractedData, _: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_mm(data, "Grant year").as_deref());
}

pub fn hie(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_mm(data, "Departure Date").as_deref());
    builder.record_mut().ship_name =
        present(data, "Shipname").map(|ship| to_initial_caps_each_word(&ship));
    builder.set_event_place(Some(places.residence_and_county(
        data.record_value("Residence"),
        data.record_value("County"),
    )));
}

pub fn military_tribunals(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    set_event_date(builder, dd_mm(data, "Date of Appeal").as_deref());
    let year = builder.record().infer_event_year();
    set_court(places, builder, data.record_value("Court"), year.as_deref());
}

pub fn prison_records(
    data: &ScotpExtractedData,
    places: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    let year = data.record_value("Year admitted");
    builder.set_event_date(None, year);
    builder.record_mut().age_at_event = data.record_value("Age").and_then(non_empty);
    if let Some(place) = places.prison(data.record_value("Prison"), year) {
        builder.set_event_place(Some(place));
    }
    let born = data.record_value("Where born").map(standardize_place_name);
    builder.set_birth_place(born.as_deref());
}

pub fn soldiers_wills(
    data: &ScotpExtractedData,
    _: &PlaceResolver<'_>,
    builder: &mut RecordBuilder,
) {
    set_event_date(builder, dd_mm(data, "Date").as_deref());
    builder.set_death_place(data.record_value("Place of Death"));
    let record = builder.record_mut();
    record.death_date = record.event_date.clone();
    record.service_number = data.record_value("Service Number").and_then(non_empty);
    record.military_regiment = data.record_value("Regiment").and_then(non_empty);
}

pub fn wills(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    set_event_date(builder, dd_mm(data, "Date").as_deref());
    let year = builder.record().infer_event_year();
    set_court(places, builder, data.record_value("Court"), year.as_deref());
    apply_will_details(data, builder);
}

pub fn vr(data: &ScotpExtractedData, places: &PlaceResolver<'_>, builder: &mut RecordBuilder) {
    let year = data.record_value("Year");
    builder.set_event_date(None, year);
    builder.set_event_place(Some(places.opr_parish(data.record_value("Parish"), year)));
}
