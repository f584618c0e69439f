//! Request shape parsing and field rules
//!
//! Parsing turns a JSON body into a typed input shape, reporting every
//! missing or mistyped field at once. Field rules (lengths, email syntax,
//! minimum age) run on the typed shape so they also guard direct callers.

use serde::Serialize;
use serde_json::{Map, Value};

use ledger_types::{
    ClientId, ClientPatch, ClientProfile, Invoice, InvoiceLine, InvoiceSpelling, NewSubscription,
    NewTransaction, TransactionId,
};

/// Maximum length of names, emails, phones and descriptions
pub const MAX_TEXT_LEN: usize = 80;

/// Kind of a field validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// Required field absent
    MissingField,
    /// Field present with the wrong JSON type
    WrongType,
    /// String longer than [`MAX_TEXT_LEN`]
    TooLong,
    /// Email present but empty
    MissingEmail,
    /// Email is not a syntactically valid address
    InvalidEmail,
    /// Email already registered to another client
    DuplicateEmail,
    /// Age under the configured minimum
    BelowMinimum,
    /// Body is not parseable JSON or was not sent as JSON
    JsonInvalid,
}

/// One offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the field, e.g. `["body", "email"]`
    pub loc: Vec<String>,
    /// Human readable message
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ValidationKind,
}

impl FieldError {
    /// Error located in the request body
    pub fn body(path: &[&str], kind: ValidationKind, msg: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(path.iter().map(|p| (*p).to_string()));
        Self {
            loc,
            msg: msg.into(),
            kind,
        }
    }

    /// Error located in a path parameter
    pub fn path(field: &str, kind: ValidationKind, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["path".to_string(), field.to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// Error located in the query string
    pub fn query(field: &str, kind: ValidationKind, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["query".to_string(), field.to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// The email is already taken
    pub fn duplicate_email() -> Self {
        Self::body(
            &["email"],
            ValidationKind::DuplicateEmail,
            "Email already exists",
        )
    }

    /// Name of the innermost location segment
    pub fn field(&self) -> &str {
        self.loc.last().map(String::as_str).unwrap_or_default()
    }
}

/// Structured list of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Empty error list
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding a single error
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Record an error
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Append every error of `other`
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// True when no error was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded errors, in detection order
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` failed with `kind`
    pub fn has(&self, field: &str, kind: ValidationKind) -> bool {
        self.0.iter().any(|e| e.field() == field && e.kind == kind)
    }

    /// `Ok(value)` if nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.loc.join("."), error.msg)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}

// ============================================================================
// Body parsing
// ============================================================================

/// Reads typed fields out of a JSON object body, collecting errors
struct BodyReader<'a> {
    fields: Option<&'a Map<String, Value>>,
    prefix: Vec<String>,
    errors: ValidationErrors,
}

impl<'a> BodyReader<'a> {
    fn new(body: &'a Value) -> Self {
        Self::at(body, Vec::new())
    }

    /// Reader for an object nested at `prefix` below the body root
    fn at(body: &'a Value, prefix: Vec<String>) -> Self {
        let mut reader = Self {
            fields: body.as_object(),
            prefix,
            errors: ValidationErrors::new(),
        };
        if reader.fields.is_none() {
            let msg = if reader.prefix.is_empty() {
                "Request body must be a JSON object"
            } else {
                "Input should be a valid object"
            };
            let error = reader.error(None, ValidationKind::WrongType, msg);
            reader.errors.push(error);
        }
        reader
    }

    fn error(
        &self,
        field: Option<&str>,
        kind: ValidationKind,
        msg: impl Into<String>,
    ) -> FieldError {
        let mut path: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        path.extend(field);
        FieldError::body(&path, kind, msg)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(field))
    }

    fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    fn missing(&mut self, field: &str) {
        // A non-object body is already reported once.
        if self.fields.is_some() {
            let error = self.error(Some(field), ValidationKind::MissingField, "Field required");
            self.errors.push(error);
        }
    }

    fn wrong_type(&mut self, field: &str, expected: &str) {
        let error = self.error(
            Some(field),
            ValidationKind::WrongType,
            format!("Input should be a valid {expected}"),
        );
        self.errors.push(error);
    }

    /// Keep a nested parse result, absorbing its errors
    fn nested<T>(&mut self, result: Result<T, ValidationErrors>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.merge(errors);
                None
            }
        }
    }

    fn string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_type(field, "string");
                None
            }
        }
    }

    fn integer(&mut self, field: &str, value: &Value) -> Option<i64> {
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                self.wrong_type(field, "integer");
                None
            }
        }
    }

    fn required_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(value) => self.string(field, value),
            None => {
                self.missing(field);
                None
            }
        }
    }

    fn required_int(&mut self, field: &str) -> Option<i64> {
        match self.get(field) {
            Some(value) => self.integer(field, value),
            None => {
                self.missing(field);
                None
            }
        }
    }

    /// Present value matching `accepts`, reported as `expected` otherwise
    fn required_value(
        &mut self,
        field: &str,
        expected: &str,
        accepts: fn(&Value) -> bool,
    ) -> Option<&'a Value> {
        match self.get(field) {
            Some(value) if accepts(value) => Some(value),
            Some(_) => {
                self.wrong_type(field, expected);
                None
            }
            None => {
                self.missing(field);
                None
            }
        }
    }

    fn optional_int(&mut self, field: &str) -> Option<i64> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.integer(field, value),
        }
    }

    /// Absent or `null` yields `None`
    fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.string(field, value),
        }
    }

    /// Absent yields `None`; `null` is rejected for non-nullable fields
    fn patch_str(&mut self, field: &str) -> Option<String> {
        self.get(field).and_then(|value| self.string(field, value))
    }

    fn patch_int(&mut self, field: &str) -> Option<i64> {
        self.get(field).and_then(|value| self.integer(field, value))
    }

    /// Absent yields `None`, `null` yields `Some(None)`
    fn patch_nullable_str(&mut self, field: &str) -> Option<Option<String>> {
        match self.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.string(field, value).map(Some),
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => Err(self.errors),
        }
    }
}

/// Parse the client creation / full-replace shape
pub fn parse_client_profile(body: &Value) -> Result<ClientProfile, ValidationErrors> {
    let mut reader = BodyReader::new(body);
    let profile = read_profile(&mut reader);
    reader.finish(profile)
}

fn read_profile(reader: &mut BodyReader<'_>) -> Option<ClientProfile> {
    let name = reader.required_str("name");
    let age = reader.required_int("age");
    let email = reader.required_str("email");
    let phone = reader.optional_str("phone");

    match (name, age, email) {
        (Some(name), Some(age), Some(email)) => Some(ClientProfile {
            name,
            age,
            email,
            phone,
        }),
        _ => None,
    }
}

/// Parse a client merge-patch; only present fields are set
pub fn parse_client_patch(body: &Value) -> Result<ClientPatch, ValidationErrors> {
    let mut reader = BodyReader::new(body);
    let patch = ClientPatch {
        name: reader.patch_str("name"),
        age: reader.patch_int("age"),
        email: reader.patch_str("email"),
        phone: reader.patch_nullable_str("phone"),
    };
    reader.finish(Some(patch))
}

/// Parse the subscription plan creation shape
pub fn parse_new_subscription(body: &Value) -> Result<NewSubscription, ValidationErrors> {
    let mut reader = BodyReader::new(body);
    let name = reader.required_str("name");
    let price = reader.required_int("price");

    let sub = name
        .zip(price)
        .map(|(name, price)| NewSubscription { name, price });
    reader.finish(sub)
}

/// Parse the transaction creation shape
pub fn parse_new_transaction(body: &Value) -> Result<NewTransaction, ValidationErrors> {
    let mut reader = BodyReader::new(body);
    let client_id = reader.required_int("client_id");
    let amount = reader.required_int("amount");
    let description = reader.required_str("description");

    let tx = match (client_id, amount, description) {
        (Some(client_id), Some(amount), Some(description)) => Some(NewTransaction {
            client_id: ClientId(client_id),
            amount,
            description,
        }),
        _ => None,
    };
    reader.finish(tx)
}

/// Parse a caller-supplied invoice.
///
/// Lines and the supplied amount are also read under their legacy keys
/// `transaction` and `ammount`; the returned spelling records which keys
/// the caller used so the response can answer in kind.
pub fn parse_invoice(body: &Value) -> Result<(Invoice, InvoiceSpelling), ValidationErrors> {
    let mut reader = BodyReader::new(body);
    let current = InvoiceSpelling::default();
    let legacy = InvoiceSpelling {
        legacy_lines: true,
        legacy_amount: true,
    };
    let spelling = InvoiceSpelling {
        legacy_lines: !reader.has(current.lines_key()) && reader.has(legacy.lines_key()),
        legacy_amount: !reader.has(current.amount_key()) && reader.has(legacy.amount_key()),
    };

    let id = reader.required_int("id");
    let client = reader
        .required_value("client", "object", Value::is_object)
        .and_then(|value| reader.nested(parse_invoice_client(value)));
    let lines_key = spelling.lines_key();
    let lines = reader
        .required_value(lines_key, "array", Value::is_array)
        .and_then(|value| reader.nested(parse_invoice_lines(lines_key, value)));
    let amount = reader.required_int(spelling.amount_key());
    let description = reader.required_str("description");
    let date = reader.required_str("date");

    let invoice = match (id, client, lines, amount, description, date) {
        (Some(id), Some(client), Some(transactions), Some(amount), Some(description), Some(date)) => {
            Some(Invoice {
                id,
                client,
                transactions,
                amount,
                description,
                date,
            })
        }
        _ => None,
    };
    reader.finish(invoice).map(|invoice| (invoice, spelling))
}

fn parse_invoice_client(value: &Value) -> Result<ClientProfile, ValidationErrors> {
    let mut reader = BodyReader::at(value, vec!["client".to_string()]);
    let profile = read_profile(&mut reader);
    if let Some(profile) = &profile {
        if let Err(error) = check_email(&profile.email) {
            let error = reader.error(Some("email"), error.kind, error.msg);
            reader.errors.push(error);
        }
    }
    reader.finish(profile)
}

fn parse_invoice_lines(key: &str, value: &Value) -> Result<Vec<InvoiceLine>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut lines = Vec::new();

    for (index, line) in value.as_array().into_iter().flatten().enumerate() {
        let mut reader = BodyReader::at(line, vec![key.to_string(), index.to_string()]);
        let id = reader.optional_int("id").map(TransactionId);
        let client_id = reader.required_int("client_id");
        let amount = reader.required_int("amount");
        let description = reader.required_str("description");

        let line = match (client_id, amount, description) {
            (Some(client_id), Some(amount), Some(description)) => Some(InvoiceLine {
                id,
                client_id: ClientId(client_id),
                amount,
                description,
            }),
            _ => None,
        };
        match reader.finish(line) {
            Ok(line) => lines.push(line),
            Err(e) => errors.merge(e),
        }
    }

    errors.into_result(lines)
}

// ============================================================================
// Field rules
// ============================================================================

/// Field rules that depend on configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRules {
    /// Minimum accepted age, unconstrained when `None`
    pub min_age: Option<i64>,
}

fn check_len(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.chars().count() > MAX_TEXT_LEN {
        errors.push(FieldError::body(
            &[field],
            ValidationKind::TooLong,
            format!("String should have at most {MAX_TEXT_LEN} characters"),
        ));
    }
}

/// Check email syntax.
///
/// Addresses must have exactly one `@`, non-empty local and domain parts,
/// no whitespace, and a dotted domain that neither starts nor ends with a dot.
pub fn validate_email_syntax(email: &str) -> Result<(), &'static str> {
    if email.chars().any(char::is_whitespace) {
        return Err("Email cannot contain whitespace");
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or("Email must contain an '@' character")?;

    if local.is_empty() {
        return Err("Email local part cannot be empty");
    }
    if domain.is_empty() {
        return Err("Email domain cannot be empty");
    }
    if domain.contains('@') {
        return Err("Email must contain exactly one '@' character");
    }
    if !domain.contains('.') {
        return Err("Email domain must contain a dot");
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err("Email domain is malformed");
    }

    Ok(())
}

/// Empty and syntax checks for an email field
pub fn check_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::body(
            &["email"],
            ValidationKind::MissingEmail,
            "Email is required",
        ));
    }
    validate_email_syntax(email)
        .map_err(|msg| FieldError::body(&["email"], ValidationKind::InvalidEmail, msg))
}

/// Field rules for a client profile. Uniqueness is checked by the service.
pub fn validate_client_profile(
    profile: &ClientProfile,
    rules: ClientRules,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_len(&mut errors, "name", &profile.name);

    if let Some(min_age) = rules.min_age {
        if profile.age < min_age {
            errors.push(FieldError::body(
                &["age"],
                ValidationKind::BelowMinimum,
                format!("Client must be at least {min_age} years old"),
            ));
        }
    }

    match check_email(&profile.email) {
        Ok(()) => check_len(&mut errors, "email", &profile.email),
        Err(e) => errors.push(e),
    }

    if let Some(phone) = &profile.phone {
        check_len(&mut errors, "phone", phone);
    }

    errors.into_result(())
}

/// Field rules for a subscription plan
pub fn validate_new_subscription(sub: &NewSubscription) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_len(&mut errors, "name", &sub.name);
    errors.into_result(())
}

/// Field rules for a transaction
pub fn validate_new_transaction(tx: &NewTransaction) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_len(&mut errors, "description", &tx.description);
    errors.into_result(())
}
