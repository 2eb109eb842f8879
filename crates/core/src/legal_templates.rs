//! Legal document templates for music collaborations.
//!
//! Templates are plain text with `{{placeholder}}` tokens. Rendering fills
//! tokens from a context built out of the project, its metadata, and the
//! free-form fields the artist entered; anything left unfilled becomes a
//! blank line for handwriting. These are starting points for a
//! conversation with a lawyer, not legal advice, and every document says so.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::{format_share, ProjectMetadata};

/// Printed wherever a placeholder has no value.
pub const BLANK: &str = "________";

/// Regex pattern matching `{{ placeholder }}` tokens.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([a-z_][a-z0-9_]*)\s*\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Context keys computed from project data; user-entered fields cannot
/// override these.
const COMPUTED_KEYS: &[&str] = &["writer_table", "writer_signatures", "publisher_table"];

const DISCLAIMER: &str = "This document is a template generated by BOX. It is not legal advice. \
Have every party review it with a qualified attorney before signing.";

const SPLIT_SHEET: &str = "\
SONGWRITER SPLIT SHEET

Song title: {{work_title}}
Performing artist: {{artist_name}}
ISWC: {{iswc}}
ISRC: {{isrc}}
Date: {{effective_date}}

The undersigned agree that they are the sole writers of the composition
named above and that ownership of the composition is divided as follows:

{{writer_table}}

Publishing:

{{publisher_table}}

Each writer represents that their contribution is original and does not
infringe the rights of any third party.

Signatures:

{{writer_signatures}}

{{disclaimer}}
";

const PRODUCER_AGREEMENT: &str = "\
PRODUCER AGREEMENT

This agreement is made on {{effective_date}} between {{artist_name}}
(\"Artist\") and {{producer_name}} (\"Producer\") for the production of the
master recording titled \"{{work_title}}\" (ISRC {{isrc}}).

1. Services. Producer will produce, record, and deliver a finished master
   of the recording to Artist.
2. Fee. Artist will pay Producer an advance of {{producer_fee}}, recoupable
   from Producer royalties.
3. Royalty. Producer is entitled to {{royalty_points}} points on the
   recording, payable after recoupment.
4. Credit. Producer will be credited as \"Produced by {{producer_name}}\".
5. Ownership. The master recording is owned by {{master_owner}}.
6. Governing law. This agreement is governed by the laws of {{governing_law}}.

Artist: ______________________   Date: __________
{{artist_name}}

Producer: ____________________   Date: __________
{{producer_name}}

{{disclaimer}}
";

const COLLABORATION_AGREEMENT: &str = "\
COLLABORATION AGREEMENT

Effective {{effective_date}}, {{artist_name}} and {{collaborator_name}}
(together, the \"Collaborators\") agree to create the work titled
\"{{work_title}}\".

1. Contributions. {{collaborator_name}} will contribute: {{contribution}}.
2. Ownership. The composition is owned according to the following splits:

{{writer_table}}

3. Credit. Each Collaborator will be credited as agreed in writing.
4. Exploitation. Neither Collaborator may license the work without the
   written consent of the other.
5. Governing law. This agreement is governed by the laws of {{governing_law}}.

{{artist_name}}: ______________________   Date: __________

{{collaborator_name}}: ______________________   Date: __________

{{disclaimer}}
";

const WORK_FOR_HIRE: &str = "\
WORK FOR HIRE AGREEMENT

This agreement is made on {{effective_date}} between {{artist_name}}
(\"Company\") and {{contractor_name}} (\"Contractor\").

1. Services. Contractor will provide the following services on the project
   \"{{work_title}}\": {{services}}.
2. Payment. Company will pay Contractor {{fee}} upon delivery.
3. Work made for hire. All results of Contractor's services are works made
   for hire, and Company owns all rights in them. Contractor retains no
   royalty or ownership interest.
4. Credit. Contractor will be credited as {{credit}}.
5. Governing law. This agreement is governed by the laws of {{governing_law}}.

Company: ______________________   Date: __________
{{artist_name}}

Contractor: ___________________   Date: __________
{{contractor_name}}

{{disclaimer}}
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    SplitSheet,
    ProducerAgreement,
    CollaborationAgreement,
    WorkForHire,
}

pub const ALL_TEMPLATES: &[TemplateKind] = &[
    TemplateKind::SplitSheet,
    TemplateKind::ProducerAgreement,
    TemplateKind::CollaborationAgreement,
    TemplateKind::WorkForHire,
];

impl TemplateKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::SplitSheet => "split_sheet",
            Self::ProducerAgreement => "producer_agreement",
            Self::CollaborationAgreement => "collaboration_agreement",
            Self::WorkForHire => "work_for_hire",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SplitSheet => "Songwriter split sheet",
            Self::ProducerAgreement => "Producer agreement",
            Self::CollaborationAgreement => "Collaboration agreement",
            Self::WorkForHire => "Work for hire agreement",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Self::SplitSheet => SPLIT_SHEET,
            Self::ProducerAgreement => PRODUCER_AGREEMENT,
            Self::CollaborationAgreement => COLLABORATION_AGREEMENT,
            Self::WorkForHire => WORK_FOR_HIRE,
        }
    }

    /// Placeholders the client should collect from the user, i.e. every
    /// token that project data does not fill.
    pub fn input_fields(self) -> Vec<String> {
        let computed = [
            "work_title",
            "artist_name",
            "iswc",
            "isrc",
            "effective_date",
            "disclaimer",
        ];
        placeholders(self.body())
            .into_iter()
            .filter(|p| !computed.contains(&p.as_str()) && !COMPUTED_KEYS.contains(&p.as_str()))
            .collect()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TEMPLATES
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ALL_TEMPLATES.iter().map(|t| t.name()).collect();
                format!(
                    "Unknown document template '{s}'. Must be one of: {}",
                    names.join(", ")
                )
            })
    }
}

/// Inputs for rendering a document about one project.
pub struct DocumentInput<'a> {
    pub work_title: &'a str,
    pub artist_name: &'a str,
    /// Date printed on the document, already formatted.
    pub effective_date: &'a str,
    pub metadata: &'a ProjectMetadata,
    /// Fields the user typed into the document form.
    pub fields: &'a BTreeMap<String, String>,
}

/// Extract unique placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in PLACEHOLDER_RE.captures_iter(template) {
        let name = cap[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Replace every placeholder with its context value, or [`BLANK`].
pub fn render(template: &str, context: &BTreeMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            context
                .get(&caps[1])
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| BLANK.to_string())
        })
        .into_owned()
}

/// Build the rendering context and render the requested template.
pub fn render_document(kind: TemplateKind, input: &DocumentInput<'_>) -> String {
    let meta = input.metadata;
    let mut context = BTreeMap::new();
    context.insert("work_title".to_string(), input.work_title.to_string());
    context.insert("artist_name".to_string(), input.artist_name.to_string());
    context.insert("effective_date".to_string(), input.effective_date.to_string());
    if let Some(iswc) = &meta.iswc {
        context.insert("iswc".to_string(), iswc.clone());
    }
    if let Some(isrc) = &meta.isrc {
        context.insert("isrc".to_string(), isrc.clone());
    }

    for (key, value) in input.fields {
        if !COMPUTED_KEYS.contains(&key.as_str()) {
            context.insert(key.clone(), value.trim().to_string());
        }
    }

    context.insert("writer_table".to_string(), writer_table(meta));
    context.insert("publisher_table".to_string(), publisher_table(meta));
    context.insert("writer_signatures".to_string(), writer_signatures(meta));
    context.insert("disclaimer".to_string(), DISCLAIMER.to_string());

    render(kind.body(), &context)
}

fn writer_table(meta: &ProjectMetadata) -> String {
    if meta.writers.is_empty() {
        return format!("  Writer: {BLANK}  PRO: {BLANK}  IPI: {BLANK}  Share: {BLANK}%");
    }
    meta.writers
        .iter()
        .map(|w| {
            format!(
                "  Writer: {}  PRO: {}  IPI: {}  Share: {}%",
                w.name,
                w.pro.as_deref().unwrap_or(BLANK),
                w.ipi.as_deref().unwrap_or(BLANK),
                w.share.map(format_share).unwrap_or_else(|| BLANK.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn publisher_table(meta: &ProjectMetadata) -> String {
    if meta.publishers.is_empty() {
        return "  Self-published / none listed".to_string();
    }
    meta.publishers
        .iter()
        .map(|p| {
            format!(
                "  Publisher: {}  IPI: {}  Share: {}%",
                p.name,
                p.ipi.as_deref().unwrap_or(BLANK),
                p.share.map(format_share).unwrap_or_else(|| BLANK.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn writer_signatures(meta: &ProjectMetadata) -> String {
    if meta.writers.is_empty() {
        return "______________________   Date: __________".to_string();
    }
    meta.writers
        .iter()
        .map(|w| format!("{}: ______________________   Date: __________", w.name))
        .collect::<Vec<_>>()
        .join("\n\n")
}
