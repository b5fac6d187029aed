//! Compile orchestration.
//!
//! Walks categories and entries in declaration order. Each entry is laid
//! out, assembled and registered on its own: a failing entry is reported
//! and left out of the toolbox, and every other entry still compiles.
//! Nothing registered before a failure is rolled back.

use std::collections::HashSet;

use bloc_layout::{lay_out, LayoutConfig, LayoutError};
use bloc_types::{BlocError, Category, Diagnostics, Entry, ErrorCode, Origin};

use crate::category::{self, BlockReference, CategoryManifest};
use crate::options::{CompileOptions, DuplicatePolicy};
use crate::registry::{BlockRegistry, GeneratorTable};
use crate::schema::{self, AssembleError};
use crate::toolbox::{self, ToolboxManifest};
use crate::vocabulary::{self, Vocabulary};

/// The result of one compile call.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub toolbox: ToolboxManifest,
    /// `None` unless [`CompileOptions::vocabulary`] is set.
    pub vocab: Option<Vocabulary>,
    pub diagnostics: Diagnostics,
}

impl CompileOutput {
    /// True if no entry failed.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Compile `categories` into a toolbox, registering one schema and one
/// generator per compiled entry.
pub fn compile(
    categories: &[Category],
    blocks: &mut BlockRegistry,
    generators: &mut GeneratorTable,
    options: &CompileOptions,
) -> CompileOutput {
    let mut compiler = Compiler::new(blocks, generators, options);
    let manifests: Vec<CategoryManifest> = categories
        .iter()
        .map(|category| compiler.compile_category(category))
        .collect();

    let defaults = if options.default_categories {
        toolbox::default_categories()
    } else {
        Vec::new()
    };
    let toolbox = toolbox::assemble(manifests, defaults);
    let vocab = vocabulary::build(&toolbox, compiler.blocks, options.vocabulary);
    let diagnostics = compiler.diagnostics;

    log::info!(
        "compiled {} of {} entries in {} categories ({} errors, {} warnings)",
        compiler.compiled,
        categories.iter().map(|c| c.entries.len()).sum::<usize>(),
        categories.len(),
        diagnostics.total_errors,
        diagnostics.total_warnings,
    );

    CompileOutput {
        toolbox,
        vocab,
        diagnostics,
    }
}

struct Compiler<'a> {
    blocks: &'a mut BlockRegistry,
    generators: &'a mut GeneratorTable,
    options: &'a CompileOptions,
    layout: LayoutConfig,
    diagnostics: Diagnostics,
    /// Entry names registered so far in this call.
    seen: HashSet<String>,
    compiled: usize,
}

impl<'a> Compiler<'a> {
    fn new(
        blocks: &'a mut BlockRegistry,
        generators: &'a mut GeneratorTable,
        options: &'a CompileOptions,
    ) -> Self {
        Self {
            blocks,
            generators,
            options,
            layout: options.layout_config(),
            diagnostics: Diagnostics::empty(),
            seen: HashSet::new(),
            compiled: 0,
        }
    }

    fn compile_category(&mut self, category: &Category) -> CategoryManifest {
        category::normalize(category, |manifest, entry| match self.compile_entry(manifest, entry) {
            Ok(reference) => {
                self.compiled += 1;
                Some(reference)
            }
            Err(error) => {
                log::warn!("{error}");
                self.diagnostics.push(error);
                None
            }
        })
    }

    fn compile_entry(
        &mut self,
        category: &CategoryManifest,
        entry: &Entry,
    ) -> Result<BlockReference, BlocError> {
        let origin = Origin::entry(&category.name, &entry.name);

        if self.seen.contains(&entry.name) {
            self.duplicate(
                ErrorCode::DUPLICATE_ENTRY,
                format!("block type '{}' is declared more than once", entry.name),
                origin.clone(),
            )?;
        }

        let layout = lay_out(&entry.template, &self.layout).map_err(|e| layout_error(e, &origin))?;
        for &index in &layout.skipped {
            let warning = BlocError::warning(
                ErrorCode::UNKNOWN_FIELD,
                "skipped a template field that is not text, widget or connection",
                origin.clone().with_field(index),
            );
            log::warn!("{warning}");
            self.diagnostics.push(warning);
        }

        let mut names = HashSet::new();
        let mut reported = HashSet::new();
        for name in &layout.connections {
            if !names.insert(name.as_str()) && reported.insert(name.as_str()) {
                self.duplicate(
                    ErrorCode::DUPLICATE_CONNECTION,
                    format!("connection '{name}' appears more than once"),
                    origin.clone(),
                )?;
            }
        }

        let schema = schema::assemble(entry, &category.colour, layout)
            .map_err(|e| assemble_error(e, &origin))?;
        log::debug!(
            "registered block '{}' ({} rows, mutable: {})",
            schema.block_type,
            schema.rows.len(),
            schema.is_mutable()
        );
        let reference = BlockReference::for_schema(&schema);
        self.blocks.register(schema);
        self.generators
            .register(entry.name.as_str(), entry.code_generator.clone());
        self.seen.insert(entry.name.clone());

        Ok(reference)
    }

    /// Report a name collision per the duplicate policy: a warning, or an
    /// error that fails the entry.
    fn duplicate(&mut self, code: ErrorCode, message: String, origin: Origin) -> Result<(), BlocError> {
        match self.options.duplicates {
            DuplicatePolicy::Warn => {
                let warning = BlocError::warning(code, message, origin);
                log::warn!("{warning}");
                self.diagnostics.push(warning);
                Ok(())
            }
            DuplicatePolicy::Strict => {
                Err(BlocError::new(code, message, origin).with_suggestion("rename one of the declarations"))
            }
        }
    }
}

fn layout_error(error: LayoutError, origin: &Origin) -> BlocError {
    let code = match error {
        LayoutError::UnsupportedType { .. } => ErrorCode::UNSUPPORTED_TYPE,
        LayoutError::UnknownField { .. } => ErrorCode::UNKNOWN_FIELD,
    };
    let origin = match error.field() {
        Some(index) => origin.clone().with_field(index),
        None => origin.clone(),
    };
    BlocError::new(code, error.to_string(), origin).with_suggestion(error.suggestion())
}

fn assemble_error(error: AssembleError, origin: &Origin) -> BlocError {
    match error {
        AssembleError::Layout(inner) => layout_error(inner, origin),
        AssembleError::VoidOutput { .. } => {
            BlocError::new(ErrorCode::UNSUPPORTED_TYPE, error.to_string(), origin.clone())
                .with_suggestion("omit the output connection to make a statement block")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloc_types::{Field, TypedConnection};
    use serde_json::json;

    fn run(categories: &[Category], options: &CompileOptions) -> (CompileOutput, BlockRegistry, GeneratorTable) {
        let mut blocks = BlockRegistry::new();
        let mut generators = GeneratorTable::new();
        let output = compile(categories, &mut blocks, &mut generators, options);
        (output, blocks, generators)
    }

    #[test]
    fn test_failed_entry_is_isolated() {
        let category = Category::new("Events")
            .with_entry(Entry::new("before").text("a"))
            .with_entry(Entry::new("on_date").input(TypedConnection::new("date", "WHEN")))
            .with_entry(Entry::new("after").text("b"));
        let (output, blocks, generators) = run(&[category], &CompileOptions::default());

        let names: Vec<&str> = output.toolbox.block_types().collect();
        assert_eq!(names, vec!["before", "after"]);
        assert!(!blocks.contains("on_date"));
        assert!(!generators.contains("on_date"));
        assert_eq!(output.diagnostics.total_errors, 1);

        let error = &output.diagnostics.errors[0];
        assert_eq!(error.code, ErrorCode::UNSUPPORTED_TYPE);
        assert_eq!(error.origin, Origin::entry("Events", "on_date").with_field(0));
    }

    #[test]
    fn test_duplicate_entry_warns_and_last_wins() {
        let category = Category::new("C")
            .with_entry(Entry::new("x").describe("first"))
            .with_entry(Entry::new("x").describe("second"));
        let (output, blocks, _) = run(&[category], &CompileOptions::default());
        assert!(output.is_success());
        assert!(output.diagnostics.contains(ErrorCode::DUPLICATE_ENTRY));
        assert_eq!(blocks.get("x").unwrap().tooltip, "second");
    }

    #[test]
    fn test_duplicate_entry_strict_keeps_first() {
        let category = Category::new("C")
            .with_entry(Entry::new("x").describe("first"))
            .with_entry(Entry::new("x").describe("second"));
        let (output, blocks, _) = run(&[category], &CompileOptions::strict());
        assert!(!output.is_success());
        assert_eq!(blocks.get("x").unwrap().tooltip, "first");
        assert_eq!(output.toolbox.block_types().count(), 1);
    }

    #[test]
    fn test_duplicate_connection_reported_once() {
        let entry = Entry::new("triple")
            .input(TypedConnection::new("number", "X"))
            .input(TypedConnection::new("number", "X"))
            .input(TypedConnection::new("number", "X"));
        let (output, _, _) = run(&[Category::new("C").with_entry(entry)], &CompileOptions::default());
        assert_eq!(output.diagnostics.total_warnings, 1);
        assert!(output.diagnostics.contains(ErrorCode::DUPLICATE_CONNECTION));
    }

    #[test]
    fn test_unknown_field_policies() {
        let mut entry = Entry::new("odd").text("x");
        entry.template.push(Field::Unrecognized(json!({"image": "cat.png"})));
        let categories = [Category::new("C").with_entry(entry)];

        let (strict, _, _) = run(&categories, &CompileOptions::default());
        assert_eq!(strict.diagnostics.errors[0].code, ErrorCode::UNKNOWN_FIELD);
        assert_eq!(strict.diagnostics.errors[0].origin.field, Some(1));

        let (lenient, blocks, _) = run(&categories, &CompileOptions::permissive());
        assert!(lenient.is_success());
        assert!(lenient.diagnostics.contains(ErrorCode::UNKNOWN_FIELD));
        assert!(blocks.contains("odd"));
    }

    #[test]
    fn test_void_output_is_unsupported_type() {
        let entry = Entry::new("bad").output("void");
        let (output, _, _) = run(&[Category::new("C").with_entry(entry)], &CompileOptions::default());
        let error = &output.diagnostics.errors[0];
        assert_eq!(error.code, ErrorCode::UNSUPPORTED_TYPE);
        assert_eq!(error.origin.field, None);
    }

    #[test]
    fn test_failed_entry_does_not_claim_its_name() {
        let category = Category::new("C")
            .with_entry(Entry::new("x").input(TypedConnection::new("date", "D")))
            .with_entry(Entry::new("x").text("ok"));

        let (strict, blocks, _) = run(&[category.clone()], &CompileOptions::strict());
        assert_eq!(strict.diagnostics.total_errors, 1);
        assert!(!strict.diagnostics.contains(ErrorCode::DUPLICATE_ENTRY));
        assert!(blocks.contains("x"));

        let (warn, blocks, _) = run(&[category], &CompileOptions::default());
        assert!(!warn.diagnostics.contains(ErrorCode::DUPLICATE_ENTRY));
        assert!(blocks.contains("x"));
        assert_eq!(warn.toolbox.block_types().collect::<Vec<_>>(), vec!["x"]);
    }
}
