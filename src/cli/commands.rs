//! CLI command implementations
//!
//! Each tool follows the same cycle: validate every argument, then open the
//! database file, parse it, apply the operation and write the result. A
//! validation or parse failure returns before anything is written.
//!
//! - querydb: read-only; the file must exist
//! - addrecord: appends one record; a missing file is created empty
//! - updaterecord: rewrites the file; a missing file is created empty

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;

use crate::observability::Logger;
use crate::operations::{self, ModuleUpdate, OperationError, PhoneUpdate, RecordPatch};
use crate::record::validators::{check_module_code, check_name, check_phone, parse_grade, parse_id};
use crate::record::{Database, StudentRecord, ValidationError, ValidationResult};
use crate::storage::{load_database, StorageWriter};

use super::args::{AddArgs, QueryArgs, UpdateArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::example::{write_example_database, ExampleOutcome};
use super::io::{write_message, write_record, write_view, RecordView};

/// Entry point for `querydb`
pub fn run_query() -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    if no_arguments() {
        return create_example("querydb", &Config::default(), &mut stdout);
    }

    let args = QueryArgs::parse_args();
    prepare(args.config.as_deref())?;
    query(&args, &mut stdout)
}

/// Entry point for `addrecord`
pub fn run_add() -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    if no_arguments() {
        return create_example("addrecord", &Config::default(), &mut stdout);
    }

    let args = AddArgs::parse_args();
    let config = prepare(args.config.as_deref())?;
    add(&args, &config, &mut stdout)
}

/// Entry point for `updaterecord`
pub fn run_update() -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    if no_arguments() {
        return create_example("updaterecord", &Config::default(), &mut stdout);
    }

    let args = UpdateArgs::parse_args();
    let config = prepare(args.config.as_deref())?;
    update(&args, &config, &mut stdout)
}

fn no_arguments() -> bool {
    std::env::args_os().len() <= 1
}

/// Loads configuration and applies the log level.
fn prepare(config_path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_or_default(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

/// Writes the example database named in `config`.
pub fn create_example<W: Write>(tool: &str, config: &Config, out: &mut W) -> CliResult<()> {
    write_message(out, &format!("{} {}", tool, env!("CARGO_PKG_VERSION")))?;

    let path = config.example_path();
    let path_str = path.display().to_string();

    match write_example_database(&path, config.layout())? {
        ExampleOutcome::Written => {
            Logger::info("EXAMPLE_DATABASE_WRITTEN", &[("path", &path_str)]);
            write_message(out, &format!("Created example database {}", path_str))
        }
        ExampleOutcome::AlreadyExists => {
            Logger::warn("EXAMPLE_DATABASE_EXISTS", &[("path", &path_str)]);
            write_message(
                out,
                &format!("Example database {} already exists; left unchanged", path_str),
            )
        }
    }
}

/// `querydb`: print all records and/or one record.
pub fn query<W: Write>(args: &QueryArgs, out: &mut W) -> CliResult<()> {
    let db_path = args.db.as_deref().ok_or_else(CliError::missing_database)?;

    let view = RecordView {
        name: args.name,
        grades: args.grades,
        phone: args.phone,
    };
    if !view.is_full() && args.sid.is_none() {
        return Err(ValidationError::Requires {
            flag: "-n, -g and -p",
            requires: "-sid <id>",
        }
        .into());
    }
    let student_id = args.sid.as_deref().map(parse_id).transpose()?;

    let db = load_logged(db_path)?;

    if args.show_all {
        for record in &db {
            write_record(out, record)?;
            writeln!(out)?;
        }
    }

    if let Some(student_id) = student_id {
        let record = operations::find_by_id(&db, student_id)
            .ok_or(OperationError::NotFound(student_id))?;
        write_view(out, record, view)?;
    }

    out.flush()?;
    Ok(())
}

/// `addrecord`: append a new record.
pub fn add<W: Write>(args: &AddArgs, config: &Config, out: &mut W) -> CliResult<()> {
    let db_path = args.db.as_deref().ok_or_else(CliError::missing_database)?;
    let record = build_record(args)?;

    let writer = StorageWriter::new(db_path, config.layout());
    ensure_file(&writer)?;

    let Some(record) = record else {
        return write_message(out, &format!("Database {} is ready", db_path.display()));
    };
    let student_id = record.student_id;

    let mut db = load_logged(db_path)?;
    operations::add(&mut db, record.clone())?;
    writer.append(&record)?;

    Logger::info(
        "RECORD_APPENDED",
        &[
            ("path", &db_path.display().to_string()),
            ("student_id", &student_id.to_string()),
        ],
    );
    write_message(out, &format!("Record added for student ID {}", student_id))
}

/// `updaterecord`: patch an existing record and rewrite the file.
pub fn update<W: Write>(args: &UpdateArgs, config: &Config, out: &mut W) -> CliResult<()> {
    let db_path = args.db.as_deref().ok_or_else(CliError::missing_database)?;
    let target = build_patch(args)?;

    let writer = StorageWriter::new(db_path, config.layout());
    ensure_file(&writer)?;

    let Some((student_id, patch)) = target else {
        return write_message(out, &format!("Database {} is ready", db_path.display()));
    };

    let mut db = load_logged(db_path)?;

    if patch.is_empty() {
        operations::find_by_id(&db, student_id).ok_or(OperationError::NotFound(student_id))?;
        Logger::warn("EMPTY_UPDATE", &[("student_id", &student_id.to_string())]);
        return write_message(out, &format!("Nothing to update for student ID {}", student_id));
    }

    operations::update(&mut db, student_id, &patch)?;
    writer.rewrite(&db)?;

    Logger::info(
        "DATABASE_REWRITTEN",
        &[
            ("path", &db_path.display().to_string()),
            ("records", &db.len().to_string()),
            ("student_id", &student_id.to_string()),
        ],
    );
    write_message(out, &format!("Student record {} updated", student_id))
}

fn ensure_file(writer: &StorageWriter) -> CliResult<()> {
    if writer.create_if_missing()? {
        Logger::info(
            "DATABASE_CREATED",
            &[("path", &writer.path().display().to_string())],
        );
    }
    Ok(())
}

fn load_logged(path: &Path) -> CliResult<Database> {
    let db = load_database(path)?;
    Logger::info(
        "DATABASE_LOADED",
        &[
            ("path", &path.display().to_string()),
            ("records", &db.len().to_string()),
        ],
    );
    Ok(db)
}

/// Builds the record described by `addrecord`'s flags.
///
/// `Ok(None)` when only `-db` was given.
pub fn build_record(args: &AddArgs) -> ValidationResult<Option<StudentRecord>> {
    let Some(sid) = args.sid.as_deref() else {
        let has_fields = args.name.is_some()
            || args.phone.is_some()
            || args.module_codes.is_some()
            || args.grades.is_some();
        if has_fields {
            return Err(ValidationError::MissingField("-sid <id>"));
        }
        return Ok(None);
    };

    let student_id = parse_id(sid)?;

    let name = args
        .name
        .as_deref()
        .map(join_words)
        .ok_or(ValidationError::MissingField("-name <name>"))?;
    check_name(&name)?;

    let phone = args.phone.as_deref().map(single_phone).transpose()?.flatten();

    if args.grades.is_some() && args.module_codes.is_none() {
        return Err(ValidationError::GradesWithoutModules);
    }

    let codes = args.module_codes.as_deref().unwrap_or_default();
    let mut seen = HashSet::new();
    for code in codes {
        check_module_code(code)?;
        if !seen.insert(code.as_str()) {
            return Err(ValidationError::DuplicateModuleCode(code.clone()));
        }
    }

    let grades = args
        .grades
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|g| parse_grade(g))
        .collect::<ValidationResult<Vec<f64>>>()?;
    if !grades.is_empty() && grades.len() != codes.len() {
        return Err(ValidationError::GradeCountMismatch {
            codes: codes.len(),
            grades: grades.len(),
        });
    }

    let mut record = StudentRecord::new(student_id, name);
    if let Some(phone) = phone {
        record.set_phone(phone);
    }
    for (i, code) in codes.iter().enumerate() {
        record.enrol(code.clone(), grades.get(i).copied());
    }

    Ok(Some(record))
}

/// Builds the target ID and patch described by `updaterecord`'s flags.
///
/// `Ok(None)` when only `-db` was given.
pub fn build_patch(args: &UpdateArgs) -> ValidationResult<Option<(u64, RecordPatch)>> {
    let Some(sid) = args.sid.as_deref() else {
        let has_fields = args.name.is_some()
            || args.phone.is_some()
            || args.module_code.is_some()
            || args.grade.is_some();
        if has_fields {
            return Err(ValidationError::MissingField("-sid <id>"));
        }
        return Ok(None);
    };

    let student_id = parse_id(sid)?;

    let name = args.name.as_deref().map(join_words);
    if let Some(ref name) = name {
        check_name(name)?;
    }

    let phone = args
        .phone
        .as_deref()
        .map(single_phone)
        .transpose()?
        .map(|phone| match phone {
            Some(phone) => PhoneUpdate::Set(phone),
            None => PhoneUpdate::Clear,
        });

    if args.grade.is_some() && args.module_code.is_none() {
        return Err(ValidationError::Requires {
            flag: "-grade",
            requires: "-modulecode <code>",
        });
    }

    let module = match args.module_code {
        Some(ref code) => {
            check_module_code(code)?;
            let grade = args.grade.as_deref().map(parse_grade).transpose()?;
            Some(ModuleUpdate {
                module_code: code.clone(),
                grade,
            })
        }
        None => None,
    };

    Ok(Some((student_id, RecordPatch { name, phone, module })))
}

fn join_words(words: &[String]) -> String {
    words.join(" ")
}

/// A phone number is a single token; extra tokens mean it contained spaces.
///
/// An empty value means "no phone on file" and yields `None`.
fn single_phone(tokens: &[String]) -> ValidationResult<Option<String>> {
    match tokens {
        [phone] if phone.is_empty() => Ok(None),
        [phone] => {
            check_phone(phone)?;
            Ok(Some(phone.clone()))
        }
        _ => Err(ValidationError::InvalidPhone(tokens.join(" "))),
    }
}
