//! Searchable field tables for the Lens Scholar API.
//!
//! See <https://docs.api.lens.org/request-scholar.html#searchable-fields>.
//! Tables are listed in the order their fields are processed.

use crate::schema::{DateFormat, FieldDefinition as F, Normalizer};

const PUBLICATION_TYPES: &[&str] = &[
    "journal article",
    "book chapter",
    "component",
    "conference proceedings article",
    "dataset",
    "book",
    "dissertation",
    "preprint",
    "libguide",
    "journal issue",
    "report",
    "conference proceedings",
    "reference entry",
    "unknown",
    "other",
];

// Spellings match the values the service indexes, including its typos.
const PUBLICATION_SUPPLEMENTARY_TYPES: &[&str] = &[
    "review",
    "standart",
    "editorial",
    "letters",
    "news",
    "journal",
    "clinical trial",
    "journal volume",
    "clinical stduy",
    "working paper",
];

const EXTERNAL_ID_TYPES: &[&str] = &["doi", "magid", "pmid", "pmcid", "coreid", "openalex"];

const RETRACTION_NATURES: &[&str] = &[
    "Retraction",
    "Expression of Concern",
    "Correction",
    "Reinstatement",
];

const RETRACTION_REASONS: &[&str] = &[
    "Author Unresponsive",
    "Bias Issues or Lack of Balance",
    "Breach of Policy by Author",
    "Cites Retracted Work",
    "Civil Proceedings",
    "Complaints about Author",
    "Complaints about Company/Institution",
    "Complaints about Third Party",
    "Concerns/Issues about Animal Welfare",
    "Concern/Issues about Article",
    "Concerns/Issues About Authorship/Affiliation",
    "Concerns/Issues About Data",
    "Concerns/Issues about Human Subject Welfare",
    "Concerns/Issues About Image",
    "Concerns/Issues about Referencing/Attributions",
    "Concerns/Issues About Results",
    "Concerns/Issues about Third Party Involvement",
    "Concerns/Issues with Peer Review",
    "Conflict of Interest",
    "Contamination of Cell Lines/Tissues",
    "Contamination of Materials",
    "Copyright Claims",
    "Criminal Proceedings",
    "Date of Retraction/Other Unknown",
    "Doing the Right Thing",
    "Duplication of Article",
    "Duplication of Data",
    "Duplication of Image",
    "Duplication of Text",
    "Duplicate Publication through Error by Journal/Publisher",
    "EOC Lifted",
    "Error by Journal/Publisher",
    "Error by Third Party",
    "Error in Analyses",
    "Error in Cell Lines/Tissues",
    "Error in Data",
    "Error in Image",
    "Error in Materials (General)",
    "Error in Methods",
    "Error in Results and/or Conclusions",
    "Error in Text",
    "Ethical Violations by Author",
    "Ethical Violations by Third Party",
    "Euphemisms for Duplication",
    "Euphemisms for Misconduct",
    "Euphemisms for Plagiarism",
    "Fake Peer Review",
    "Falsification/Fabrication of Data",
    "Falsification/Fabrication of Image",
    "Falsification/Fabrication of Results",
    "Forged Authorship",
    "Hoax Paper",
    "Informed/Patient Consent – None/Withdrawn",
    "Investigation by Company/Institution",
    "Investigation by Journal/Publisher",
    "Investigation by ORI",
    "Investigation by Third Party",
    "Lack of Approval from Author",
    "Lack of Approval from Company/Institution",
    "Lack of Approval from Third Party",
    "Lack of IRB/IACUC Approval",
    "Legal Reasons/Legal Threats",
    "Manipulation of Images",
    "Manipulation of Results",
    "Miscommunication by Author",
    "Miscommunication by Company/Institution",
    "Miscommunication by Journal/Publisher",
    "Miscommunication by Third Party",
    "Misconduct – Official Investigation/Finding",
    "Misconduct by Author",
    "Misconduct by Company/Institution",
    "Misconduct by Third Party",
    "No Further Action",
    "Nonpayment of Fees/Refusal to Pay",
    "Notice – Lack of",
    "Notice – Limited or No Information",
    "Notice – Unable to Access via current resources",
    "Objections by Author(s)",
    "Objections by Company/Institution",
    "Objections by Third Party",
    "Original Data not Provided",
    "Paper Mill",
    "Plagiarism of Article",
    "Plagiarism of Data",
    "Plagiarism of Image",
    "Plagiarism of Text",
    "Publishing Ban",
    "Randomly Generated Content",
    "Results Not Reproducible",
    "Retract and Replace",
    "Rogue Editor",
    "Sabotage of Materials",
    "Sabotage of Methods",
    "Salami Slicing",
    "Taken from Dissertation/Thesis",
    "Temporary Removal",
    "Transfer of Copyright/Ownership",
    "Unreliable Data",
    "Unreliable Image",
    "Unreliable Results",
    "Updated to Correction",
    "Updated to Retraction",
    "Upgrade/Update of Prior Notice",
    "Removed",
    "Withdrawn (out of date)",
    "Withdrawn to Publish in Different Journal",
];

pub(crate) static GENERAL: &[F] = &[
    F::text("title", "title"),
    F::text("abstract", "abstract"),
    F::text("full_text", "full_text"),
    F::text("publication_type", "publication_type").allowed(PUBLICATION_TYPES),
    F::text("publication_supplementary_type", "publication_supplementary_type")
        .allowed(PUBLICATION_SUPPLEMENTARY_TYPES),
    F::text("external_id_type", "external_id_type").allowed(EXTERNAL_ID_TYPES),
];

pub(crate) static RETRACTION: &[F] = &[
    F::text("retraction_update_date", "retraction_update.date").date(DateFormat::YearMonthDay),
    F::text("retraction_update_nature", "retraction_update.nature").allowed(RETRACTION_NATURES),
    F::text("retraction_update_reason", "retraction_update.reason").allowed(RETRACTION_REASONS),
];

pub(crate) static AUTHOR: &[F] = &[
    F::text("author_display_name", "author.display_name"),
    F::text("author_first_name", "author.first_name"),
    F::text("author_last_name", "author.last_name"),
    F::text("author_orcid", "author.orcid"),
    F::text("author_maqid", "author.maqid"),
    F::text("author_affiliation_name", "author.affiliation.name"),
    F::integer("author_count", "author_count"),
];

pub(crate) static CITATION: &[F] = &[
    F::text("reference_lens_id", "reference_lens_id"),
    F::integer("referenced_by_count", "referenced_by_count"),
    F::integer("reference_count", "reference_count"),
    F::text("referenced_by_patent_lens_id", "referenced_by_patent.lens_id"),
    F::integer("referenced_by_patent_count", "referenced_by_patent_count"),
];

pub(crate) static EXTERNAL_ID: &[F] = &[
    F::text("doi", "doi"),
    F::text("magid", "magid"),
    F::text("pmid", "pmid"),
    F::text("pmcid", "pmcid"),
    F::text("coreid", "coreid"),
    F::text("openalex", "openalex"),
];

pub(crate) static SOURCE: &[F] = &[
    F::text("source_title", "source.title"),
    F::text("source_title_exact", "source.title.exact"),
    F::text("source_publisher", "source.publisher"),
    F::text("source_country", "source.country"),
    F::text("source_asjc_code", "source.asjc_code"),
    F::text("source_issn", "source.issn").normalized(Normalizer::Issn),
];

pub(crate) static SUBJECT_MATTER: &[F] = &[
    F::text("field_of_study", "field_of_study"),
    F::text("source_asjc_subject", "source.asjc_subject"),
    F::text("keyword", "keyword"),
    F::text("chemical_mesh_ui", "chemical.mesh_ui"),
    F::text("chemical_registry_number", "chemical.registry_number"),
    F::text("chemical_substance_name", "chemical.substance_name"),
    F::text("mesh_term_mesh_heading", "mesh_term.mesh_heading"),
    F::text("mesh_term_mesh_ui", "mesh_term.mesh_ui"),
];

pub(crate) static INSTITUTIONS: &[F] = &[
    F::text("author_affiliation_name_exact", "author.affiliation.name.exact"),
    F::text("author_affiliation_name_original", "author.affiliation.name.original"),
    F::text("author_affiliation_ror_id", "author.affiliation.ror_id"),
    F::text("author_affiliation_ror_id_lineage", "author.affiliation.ror_id_lineage"),
    F::text("author_affiliation_address_city", "author.affiliation.address.city"),
    F::text(
        "author_affiliation_address_state_code",
        "author.affiliation.address.state_code",
    ),
    F::text(
        "author_affiliation_address_country_code",
        "author.affiliation.address.country_code",
    ),
    F::text("author_affiliation_type", "author.affiliation.type"),
];

pub(crate) static FUNDING: &[F] = &[
    F::text("funding_country", "funding.country"),
    F::text("funding_funding_id", "funding.funding_id"),
    F::text("funding_organisation", "funding.organisation"),
    F::text("funding_organisation_exact", "funding.organisation.exact"),
];

pub(crate) static CONFERENCES: &[F] = &[
    F::text("conference_name", "conference.name"),
    F::text("conference_instance", "conference.instance"),
    F::text("conference_location", "conference.location"),
];

pub(crate) static CLINICAL_TRIALS: &[F] = &[
    F::text("clinical_trial_registry", "clinical_trial.registry"),
    F::text("clinical_trial_trial_id", "clinical_trial.trial_id"),
];

pub(crate) static OPEN_ACCESS: &[F] = &[
    F::text("open_access_colour", "open_access.colour"),
    F::text("open_access_license", "open_access.license"),
];

pub(crate) static DATE: &[F] = &[
    F::integer("year_published", "year_published").date(DateFormat::Year),
    F::text("date_published", "date_published").date(DateFormat::YearMonthDay),
    F::text("created", "created").date(DateFormat::YearMonthDay),
];

pub(crate) static BOOLEAN_FILTERS: &[F] = &[
    F::boolean("is_referenced_by_scholarly", "is_referenced_by_scholarly"),
    F::boolean("has_patent_citations", "has_patent_citations"),
    F::boolean("has_affiliation", "has_affiliation"),
    F::boolean("has_affiliation_grid", "has_affiliation_grid"),
    F::boolean("has_affiliation_ror", "has_affiliation_ror"),
    F::boolean("has_orcid", "has_orcid"),
    F::boolean("has_mesh_term", "has_mesh_term"),
    F::boolean("has_chemical", "has_chemical"),
    F::boolean("has_keyword", "has_keyword"),
    F::boolean("has_clinical_trial", "has_clinical_trial"),
    F::boolean("has_field_of_study", "has_field_of_study"),
    F::boolean("has_abstract", "has_abstract"),
    F::boolean("has_full_text", "has_full_text"),
    F::boolean("has_funding", "has_funding"),
    F::boolean("is_open_access", "is_open_access"),
    F::boolean("in_analytics_set", "in_analytics_set"),
    F::boolean("source_is_diamond", "source.is_diamond"),
    F::boolean("is_retracted", "is_retracted"),
];

pub(crate) static RANGE: &[F] = &[
    F::text("date_published", "date_published").date(DateFormat::YearMonthDay),
    F::integer("year_published", "year_published").date(DateFormat::Year),
    F::text("created", "created").date(DateFormat::YearMonthDay),
    F::text("retraction_update_date", "retraction_update.date").date(DateFormat::YearMonthDay),
    F::integer("author_count", "author_count"),
    F::integer("referenced_by_count", "referenced_by_count"),
    F::integer("reference_count", "reference_count"),
    F::integer("referenced_by_patent_count", "referenced_by_patent.count"),
];
