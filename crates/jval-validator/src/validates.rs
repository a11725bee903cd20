use std::fmt::{Display, Formatter};

use either::Either;
use jval_schema::pattern::compile_pattern;
use jval_schema::{Keys, Schema, SchemaType, REF_PREFIX};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::report::Collector;

static TIME_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])(\.[0-9]{6})?(([Zz])|([+\-]([01][0-9]|2[0-3]):[0-5][0-9]))$").unwrap()
});
static UUID_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(
        r"^[0-9a-fA-F]{8}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

pub(crate) struct Context<'a> {
    pub(crate) root: &'a Schema,
    pub(crate) max_depth: usize,
}

pub(crate) fn validate(
    ctx: &Context,
    schema: &Schema,
    keys: &Keys,
    value: &Value,
    collector: &mut Collector,
) {
    validate_impl(ctx, 0, schema, keys, value, collector);
}

// Keyword order is fixed so that multiple violations at one path always
// come out in the same order: type first, then value checks gated on the
// instance kind, combinators last.
fn validate_impl(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if depth > ctx.max_depth {
        c.report_depth_exceeded(keys);
        return;
    }
    let local_schema = match resolve(ctx, local_schema) {
        Some(v) => v,
        None => return,
    };

    validate_type(local_schema, keys, value, c);
    validate_enum(local_schema, keys, value, c);
    validate_const(local_schema, keys, value, c);

    if value.is_number() {
        validate_bounds(local_schema, keys, value, c);
        validate_multiple_of(local_schema, keys, value, c);
    }

    if value.is_string() {
        validate_length(local_schema, keys, value, c);
        validate_pattern(local_schema, keys, value, c);
        validate_format(local_schema, keys, value, c);
    }

    if value.is_array() {
        validate_items(ctx, depth, local_schema, keys, value, c);
        validate_contains(ctx, depth, local_schema, keys, value, c);
        validate_items_count(local_schema, keys, value, c);
        validate_unique_items(local_schema, keys, value, c);
    }

    if value.is_object() {
        validate_properties(ctx, depth, local_schema, keys, value, c);
        validate_required(local_schema, keys, value, c);
        validate_additional_properties(ctx, depth, local_schema, keys, value, c);
        validate_properties_count(local_schema, keys, value, c);
    }

    validate_allof(ctx, depth, local_schema, keys, value, c);
    validate_anyof(ctx, depth, local_schema, keys, value, c);
    validate_oneof(ctx, depth, local_schema, keys, value, c);
    validate_not(ctx, depth, local_schema, keys, value, c);
    validate_conditional(ctx, depth, local_schema, keys, value, c);
}

fn validate_type(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let types = match local_schema.schema_type.as_ref() {
        Some(v) => v.as_vec(),
        None => return,
    };
    if !types.iter().any(|t| t.match_value(value)) {
        c.push(Violation::new(keys, ViolationKind::Type { types }));
    }
}

fn validate_enum(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if let Some(enum_items) = local_schema.enum_value.as_ref() {
        if !enum_items.iter().any(|item| equal::equal(value, item)) {
            c.push(Violation::new(keys, ViolationKind::Enum));
        }
    }
}

fn validate_const(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if let Some(const_value) = local_schema.const_value.as_ref() {
        if !equal::equal(value, const_value) {
            c.push(Violation::new(keys, ViolationKind::Const));
        }
    }
}

fn validate_bounds(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let value = match value.as_f64() {
        Some(v) => v,
        None => return,
    };
    if let Some(limit) = local_schema.minimum {
        if value < limit {
            c.push(Violation::new(keys, ViolationKind::Minimum { limit }));
        }
    }
    if let Some(limit) = local_schema.exclusive_minimum {
        if value <= limit {
            c.push(Violation::new(keys, ViolationKind::ExclusiveMinimum { limit }));
        }
    }
    if let Some(limit) = local_schema.maximum {
        if value > limit {
            c.push(Violation::new(keys, ViolationKind::Maximum { limit }));
        }
    }
    if let Some(limit) = local_schema.exclusive_maximum {
        if value >= limit {
            c.push(Violation::new(keys, ViolationKind::ExclusiveMaximum { limit }));
        }
    }
}

fn validate_multiple_of(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let multiple = match local_schema.multiple_of {
        Some(v) => v,
        None => return,
    };
    let value = match value.as_f64() {
        Some(v) => v,
        None => return,
    };
    let valid = if value.fract() == 0f64 && multiple.fract() == 0f64 {
        (value % multiple) == 0f64
    } else {
        // Fractional multiples are checked with an epsilon tolerance; the
        // remainder keeps the sign of the value, so compare its magnitude
        let remainder = ((value / multiple) % 1f64).abs();
        remainder < f64::EPSILON || remainder > 1f64 - f64::EPSILON
    };
    if !valid {
        c.push(Violation::new(keys, ViolationKind::MultipleOf { multiple }));
    }
}

fn validate_length(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let value = match value.as_str() {
        Some(v) => v,
        None => return,
    };
    // Lengths count Unicode code points, not bytes
    let len = bytecount::num_chars(value.as_bytes());
    if let Some(limit) = local_schema.min_length {
        if len < limit as usize {
            c.push(Violation::new(keys, ViolationKind::MinLength { limit }));
        }
    }
    if let Some(limit) = local_schema.max_length {
        if len > limit as usize {
            c.push(Violation::new(keys, ViolationKind::MaxLength { limit }));
        }
    }
}

fn validate_pattern(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if let Some(pattern) = local_schema.pattern.as_ref() {
        let value = match value.as_str() {
            Some(v) => v,
            None => return,
        };
        // The builder rejected uncompilable patterns already
        if let Ok(re) = compile_pattern(pattern) {
            if !matches!(re.is_match(value), Ok(true)) {
                c.push(Violation::new(
                    keys,
                    ViolationKind::Pattern {
                        pattern: pattern.clone(),
                    },
                ));
            }
        }
    }
}

fn validate_format(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if let Some(format) = local_schema.format.as_ref() {
        let value = match value.as_str() {
            Some(v) => v,
            None => return,
        };
        let valid = match format.as_str() {
            "date" => formats::date(value),
            "date-time" => formats::date_time(value),
            "time" => formats::time(value),
            "email" => formats::email(value),
            "hostname" => formats::hostname(value),
            "ipv4" => formats::ipv4(value),
            "ipv6" => formats::ipv6(value),
            "uri" => formats::uri(value),
            "regex" => formats::regex(value),
            "uuid" => formats::uuid(value),
            // Unrecognized format names validate nothing
            _ => true,
        };
        if !valid {
            c.push(Violation::new(
                keys,
                ViolationKind::Format {
                    format: format.clone(),
                },
            ));
        }
    }
}

fn validate_items(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(schema) = local_schema.items.as_ref() {
        let items = match value.as_array() {
            Some(v) => v,
            None => return,
        };
        for (idx, item) in items.iter().enumerate() {
            validate_impl(ctx, depth + 1, schema, &keys.join(idx), item, c);
        }
    }
}

fn validate_contains(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(schema) = local_schema.contains.as_ref() {
        let items = match value.as_array() {
            Some(v) => v,
            None => return,
        };
        let any_matched = items.iter().enumerate().any(|(idx, item)| {
            let mut transient = Collector::default();
            validate_impl(ctx, depth + 1, schema, &keys.join(idx), item, &mut transient);
            transient.is_empty()
        });
        if !any_matched {
            c.push(Violation::new(keys, ViolationKind::Contains));
        }
    }
}

fn validate_items_count(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let items = match value.as_array() {
        Some(v) => v,
        None => return,
    };
    if let Some(limit) = local_schema.min_items {
        if items.len() < limit as usize {
            c.push(Violation::new(keys, ViolationKind::MinItems { limit }));
        }
    }
    if let Some(limit) = local_schema.max_items {
        if items.len() > limit as usize {
            c.push(Violation::new(keys, ViolationKind::MaxItems { limit }));
        }
    }
}

fn validate_unique_items(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if local_schema.unique_items != Some(true) {
        return;
    }
    let items = match value.as_array() {
        Some(v) => v,
        None => return,
    };
    if !equal::is_unique(items) {
        c.push(Violation::new(keys, ViolationKind::UniqueItems));
    }
}

fn validate_properties(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    let object = match value.as_object() {
        Some(v) => v,
        None => return,
    };
    for (name, member) in object.iter() {
        let member_keys = keys.join(name.as_str());
        if let Some(schema) = local_schema.properties.as_ref().and_then(|v| v.get(name)) {
            validate_impl(ctx, depth + 1, schema, &member_keys, member, c);
        }
        if let Some(patterns) = local_schema.pattern_properties.as_ref() {
            for (pattern, schema) in patterns.iter() {
                if pattern_matches(pattern, name) {
                    validate_impl(ctx, depth + 1, schema, &member_keys, member, c);
                }
            }
        }
    }
}

fn validate_required(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    if let Some(required) = local_schema.required.as_ref() {
        let object = match value.as_object() {
            Some(v) => v,
            None => return,
        };
        for name in required.iter() {
            if !object.contains_key(name) {
                c.push(Violation::new(
                    keys,
                    ViolationKind::Required { name: name.clone() },
                ));
            }
        }
    }
}

fn validate_additional_properties(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    let additional = match local_schema.additional_properties.as_ref() {
        Some(v) => v,
        None => return,
    };
    let object = match value.as_object() {
        Some(v) => v,
        None => return,
    };
    for (name, member) in object.iter() {
        if local_schema
            .properties
            .as_ref()
            .map(|v| v.contains_key(name))
            .unwrap_or_default()
        {
            continue;
        }
        if local_schema
            .pattern_properties
            .as_ref()
            .map(|v| v.keys().any(|pattern| pattern_matches(pattern, name)))
            .unwrap_or_default()
        {
            continue;
        }
        match additional.value.as_ref() {
            Either::Left(allowed) => {
                if !allowed {
                    c.push(Violation::new(
                        keys,
                        ViolationKind::AdditionalProperties { name: name.clone() },
                    ));
                }
            }
            Either::Right(schema) => {
                validate_impl(ctx, depth + 1, schema, &keys.join(name.as_str()), member, c)
            }
        }
    }
}

fn validate_properties_count(local_schema: &Schema, keys: &Keys, value: &Value, c: &mut Collector) {
    let object = match value.as_object() {
        Some(v) => v,
        None => return,
    };
    if let Some(limit) = local_schema.min_properties {
        if object.len() < limit as usize {
            c.push(Violation::new(keys, ViolationKind::MinProperties { limit }));
        }
    }
    if let Some(limit) = local_schema.max_properties {
        if object.len() > limit as usize {
            c.push(Violation::new(keys, ViolationKind::MaxProperties { limit }));
        }
    }
}

fn validate_allof(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(all_of) = local_schema.all_of.as_ref() {
        // Every branch must pass, so branch violations go straight into
        // the report without short-circuiting
        for schema in all_of.iter() {
            validate_impl(ctx, depth + 1, schema, keys, value, c);
        }
    }
}

fn validate_anyof(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(any_of) = local_schema.any_of.as_ref() {
        let mut branch_violations = vec![];
        let mut valid = false;
        for schema in any_of.iter() {
            let mut transient = Collector::default();
            validate_impl(ctx, depth + 1, schema, keys, value, &mut transient);
            if transient.is_empty() {
                valid = true;
            } else {
                branch_violations.extend(transient.into_violations());
            }
        }
        if !valid {
            c.push(Violation::new(
                keys,
                ViolationKind::AnyOf {
                    violations: branch_violations,
                },
            ));
        }
    }
}

fn validate_oneof(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(one_of) = local_schema.one_of.as_ref() {
        let mut matched = 0;
        for schema in one_of.iter() {
            let mut transient = Collector::default();
            validate_impl(ctx, depth + 1, schema, keys, value, &mut transient);
            if transient.is_empty() {
                matched += 1;
            }
        }
        if matched != 1 {
            c.push(Violation::new(keys, ViolationKind::OneOf { matched }));
        }
    }
}

fn validate_not(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(schema) = local_schema.not.as_ref() {
        let mut transient = Collector::default();
        validate_impl(ctx, depth + 1, schema, keys, value, &mut transient);
        if transient.is_empty() {
            c.push(Violation::new(keys, ViolationKind::Not));
        }
    }
}

fn validate_conditional(
    ctx: &Context,
    depth: usize,
    local_schema: &Schema,
    keys: &Keys,
    value: &Value,
    c: &mut Collector,
) {
    if let Some(if_schema) = local_schema.if_value.as_ref() {
        let mut transient = Collector::default();
        validate_impl(ctx, depth + 1, if_schema, keys, value, &mut transient);
        if transient.is_empty() {
            if let Some(then_schema) = local_schema.then_value.as_ref() {
                validate_impl(ctx, depth + 1, then_schema, keys, value, c);
            }
        } else if let Some(else_schema) = local_schema.else_value.as_ref() {
            validate_impl(ctx, depth + 1, else_schema, keys, value, c);
        }
    }
}

// A `$ref` chain is followed iteratively; a chain that loops without
// reaching a concrete schema resolves to nothing.
fn resolve<'a>(ctx: &Context<'a>, local_schema: &'a Schema) -> Option<&'a Schema> {
    let max_hops = ctx.root.defs.as_ref().map(|v| v.len()).unwrap_or_default() + 1;
    let mut hops = 0;
    let mut schema = local_schema;
    while let Some(ref_value) = schema.ref_value.as_ref() {
        if hops > max_hops {
            return None;
        }
        hops += 1;
        if ref_value == "#" {
            schema = ctx.root;
        } else {
            schema = ref_value
                .strip_prefix(REF_PREFIX)
                .and_then(|name| ctx.root.defs.as_ref()?.get(name))?;
        }
    }
    Some(schema)
}

fn pattern_matches(pattern: &str, name: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(re) => matches!(re.is_match(name), Ok(true)),
        Err(_) => false,
    }
}

/// A single located failure of the instance against one schema keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub keys: Keys,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(keys: &Keys, kind: ViolationKind) -> Self {
        Self {
            keys: keys.clone(),
            kind,
        }
    }

    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}: {}", self.keys, self.kind.keyword(), self.kind)
    }
}

// Serialized as `{path, keyword, message}` for machine-readable reports
impl serde::Serialize for Violation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut record = serializer.serialize_struct("Violation", 3)?;
        record.serialize_field("path", &self.keys)?;
        record.serialize_field("keyword", self.kind.keyword())?;
        record.serialize_field("message", &self.kind.to_string())?;
        record.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Type { types: Vec<SchemaType> },
    Enum,
    Const,
    Minimum { limit: f64 },
    ExclusiveMinimum { limit: f64 },
    Maximum { limit: f64 },
    ExclusiveMaximum { limit: f64 },
    MultipleOf { multiple: f64 },
    MinLength { limit: u32 },
    MaxLength { limit: u32 },
    Pattern { pattern: String },
    Format { format: String },
    Contains,
    MinItems { limit: u32 },
    MaxItems { limit: u32 },
    UniqueItems,
    Required { name: String },
    AdditionalProperties { name: String },
    MinProperties { limit: u32 },
    MaxProperties { limit: u32 },
    AnyOf { violations: Vec<Violation> },
    OneOf { matched: usize },
    Not,
    MaxDepth,
}

impl ViolationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ViolationKind::Type { .. } => "type",
            ViolationKind::Enum => "enum",
            ViolationKind::Const => "const",
            ViolationKind::Minimum { .. } => "minimum",
            ViolationKind::ExclusiveMinimum { .. } => "exclusiveMinimum",
            ViolationKind::Maximum { .. } => "maximum",
            ViolationKind::ExclusiveMaximum { .. } => "exclusiveMaximum",
            ViolationKind::MultipleOf { .. } => "multipleOf",
            ViolationKind::MinLength { .. } => "minLength",
            ViolationKind::MaxLength { .. } => "maxLength",
            ViolationKind::Pattern { .. } => "pattern",
            ViolationKind::Format { .. } => "format",
            ViolationKind::Contains => "contains",
            ViolationKind::MinItems { .. } => "minItems",
            ViolationKind::MaxItems { .. } => "maxItems",
            ViolationKind::UniqueItems => "uniqueItems",
            ViolationKind::Required { .. } => "required",
            ViolationKind::AdditionalProperties { .. } => "additionalProperties",
            ViolationKind::MinProperties { .. } => "minProperties",
            ViolationKind::MaxProperties { .. } => "maxProperties",
            ViolationKind::AnyOf { .. } => "anyOf",
            ViolationKind::OneOf { .. } => "oneOf",
            ViolationKind::Not => "not",
            ViolationKind::MaxDepth => "maxDepth",
        }
    }
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::Type { types } => write!(
                f,
                "the value must be of type {}",
                types
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(",")
            ),
            ViolationKind::Enum => write!(f, "the value is not one of the allowed values"),
            ViolationKind::Const => write!(f, "the value does not equal the constant"),
            ViolationKind::Minimum { limit } => {
                write!(f, "the value is less than minimum {}", limit)
            }
            ViolationKind::ExclusiveMinimum { limit } => {
                write!(f, "the value must be greater than {}", limit)
            }
            ViolationKind::Maximum { limit } => {
                write!(f, "the value is greater than maximum {}", limit)
            }
            ViolationKind::ExclusiveMaximum { limit } => {
                write!(f, "the value must be less than {}", limit)
            }
            ViolationKind::MultipleOf { multiple } => {
                write!(f, "the value is not a multiple of {}", multiple)
            }
            ViolationKind::MinLength { limit } => {
                write!(f, "the string has fewer than {} characters", limit)
            }
            ViolationKind::MaxLength { limit } => {
                write!(f, "the string has more than {} characters", limit)
            }
            ViolationKind::Pattern { pattern } => {
                write!(f, "the string does not match pattern {}", pattern)
            }
            ViolationKind::Format { format } => {
                write!(f, "the string is not a valid {}", format)
            }
            ViolationKind::Contains => write!(f, "no item matches the contains schema"),
            ViolationKind::MinItems { limit } => {
                write!(f, "the array has fewer than {} items", limit)
            }
            ViolationKind::MaxItems { limit } => {
                write!(f, "the array has more than {} items", limit)
            }
            ViolationKind::UniqueItems => write!(f, "the array items are not unique"),
            ViolationKind::Required { name } => {
                write!(f, "the required property \"{}\" is missing", name)
            }
            ViolationKind::AdditionalProperties { name } => {
                write!(f, "the additional property \"{}\" is not allowed", name)
            }
            ViolationKind::MinProperties { limit } => {
                write!(f, "the object has fewer than {} properties", limit)
            }
            ViolationKind::MaxProperties { limit } => {
                write!(f, "the object has more than {} properties", limit)
            }
            ViolationKind::AnyOf { violations } => {
                let mut extra = String::new();
                if !violations.is_empty() {
                    extra = format!(
                        "; {}",
                        violations
                            .iter()
                            .map(|v| v.to_string())
                            .collect::<Vec<String>>()
                            .join("; ")
                    );
                }
                write!(f, "no branch matched{}", extra)
            }
            ViolationKind::OneOf { matched } => {
                write!(f, "{} branches matched, expected exactly 1", matched)
            }
            ViolationKind::Not => write!(f, "the value must not match the given schema"),
            ViolationKind::MaxDepth => write!(f, "schema too deep"),
        }
    }
}

mod formats {
    use super::*;
    use std::net::IpAddr;
    use std::str::FromStr;

    pub(crate) fn date(value: &str) -> bool {
        time::Date::parse(
            value,
            &time::macros::format_description!("[year]-[month]-[day]"),
        )
        .is_ok()
    }

    pub(crate) fn date_time(value: &str) -> bool {
        time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339).is_ok()
    }

    pub(crate) fn time(value: &str) -> bool {
        TIME_RE.is_match(value)
    }

    pub(crate) fn email(value: &str) -> bool {
        if let Some('.') = value.chars().next() {
            // dot before the local part is not valid
            return false;
        }
        // The loop exits as soon as it finds `@`, so the match arms only
        // ever examine the local part
        for (a, b) in value.chars().zip(value.chars().skip(1)) {
            match (a, b) {
                ('.', '.') | ('.', '@') => return false,
                (_, '@') => return true,
                (_, _) => continue,
            }
        }
        false
    }

    pub(crate) fn hostname(value: &str) -> bool {
        !(value.is_empty()
            || value.starts_with('-')
            || value.ends_with('-')
            || bytecount::num_chars(value.as_bytes()) > 255
            || value
                .chars()
                .any(|c| !(c.is_alphanumeric() || c == '-' || c == '.'))
            || value
                .split('.')
                .any(|part| bytecount::num_chars(part.as_bytes()) > 63))
    }

    pub(crate) fn ipv4(value: &str) -> bool {
        if value.starts_with('0') {
            return false;
        }
        match IpAddr::from_str(value) {
            Ok(i) => i.is_ipv4(),
            Err(_) => false,
        }
    }

    pub(crate) fn ipv6(value: &str) -> bool {
        match IpAddr::from_str(value) {
            Ok(i) => i.is_ipv6(),
            Err(_) => false,
        }
    }

    pub(crate) fn uri(value: &str) -> bool {
        url::Url::from_str(value).is_ok()
    }

    pub(crate) fn regex(value: &str) -> bool {
        compile_pattern(value).is_ok()
    }

    pub(crate) fn uuid(value: &str) -> bool {
        UUID_RE.is_match(value)
    }
}

mod equal {
    use ahash::{AHashSet, AHasher};
    use serde_json::{Map, Value};
    use std::hash::{Hash, Hasher};

    /// Structural deep-equality: numbers compare by value, arrays are
    /// order-sensitive, object keys are order-insensitive.
    pub(crate) fn equal(left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Array(left), Value::Array(right)) => {
                left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(a, b)| equal(a, b))
            }
            (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
            (_, _) => false,
        }
    }

    fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
        left.len() == right.len()
            && left
                .iter()
                .all(|(key, a)| right.get(key).map(|b| equal(a, b)).unwrap_or_default())
    }

    // Past this size pairwise comparison loses to hashing every element
    const ITEMS_SIZE_THRESHOLD: usize = 15;

    pub(crate) fn is_unique(items: &[Value]) -> bool {
        if items.len() <= ITEMS_SIZE_THRESHOLD {
            for (idx, item) in items.iter().enumerate() {
                if items[idx + 1..].iter().any(|other| equal(item, other)) {
                    return false;
                }
            }
            true
        } else {
            let mut seen = AHashSet::with_capacity(items.len());
            items.iter().map(HashedValue).all(move |v| seen.insert(v))
        }
    }

    struct HashedValue<'a>(&'a Value);

    impl PartialEq for HashedValue<'_> {
        fn eq(&self, other: &Self) -> bool {
            equal(self.0, other.0)
        }
    }

    impl Eq for HashedValue<'_> {}

    impl Hash for HashedValue<'_> {
        fn hash<H: Hasher>(&self, state: &mut H) {
            match self.0 {
                Value::Null => state.write_u32(3_221_225_473), // chosen randomly
                Value::Bool(item) => item.hash(state),
                // Numbers hash through f64 so that the hash agrees with
                // the by-value equality above
                Value::Number(item) => item.as_f64().unwrap_or_default().to_bits().hash(state),
                Value::String(item) => item.hash(state),
                Value::Array(items) => {
                    for item in items {
                        HashedValue(item).hash(state);
                    }
                }
                Value::Object(items) => {
                    // XOR keeps the object hash independent of member order
                    let mut hash = 0;
                    for (key, value) in items {
                        let mut item_hasher = AHasher::default();
                        key.hash(&mut item_hasher);
                        HashedValue(value).hash(&mut item_hasher);
                        hash ^= item_hasher.finish();
                    }
                    state.write_u64(hash);
                }
            }
        }
    }

}
