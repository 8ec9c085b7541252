//! Snippets parsed by the full Gherkin grammar instead of the line parser.

use std::cell::RefCell;

use nested_steps::{
    GherkinGrammar, MatchPolicy, Registry, StepContext, StepError, StepInvoker, StepKeyword,
    assert_step_err, assert_step_ok,
};
use rstest::{fixture, rstest};

type Log = RefCell<Vec<String>>;

fn push(ctx: &StepContext<'_>, entry: String) -> Result<(), StepError> {
    let log = ctx
        .get::<Log>("log")
        .ok_or_else(|| StepError::failed("log fixture missing"))?;
    log.borrow_mut().push(entry);
    Ok(())
}

#[fixture]
fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(StepKeyword::Given, "a cart with:", |ctx, input| {
            let table = input
                .table()
                .ok_or_else(|| StepError::failed("a table is required"))?;
            for row in table.hashes() {
                push(ctx, format!("item {}", row.get("item").copied().unwrap_or_default()))?;
            }
            Ok(())
        })
        .and_then(|r| {
            r.register(StepKeyword::When, "I leave a note:", |ctx, input| {
                let doc = input
                    .docstring()
                    .ok_or_else(|| StepError::failed("a doc string is required"))?;
                push(ctx, format!("note {}", doc.content.trim()))
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "I check out", |ctx, _| {
                push(ctx, "checkout".to_owned())
            })
        })
        .unwrap_or_else(|err| panic!("step patterns compile: {err}"));
    registry
}

fn run(registry: &Registry, snippet: &str) -> (Result<(), StepError>, Vec<String>) {
    let log = Log::default();
    let invoker = StepInvoker::new(registry)
        .with_grammar(&GherkinGrammar)
        .with_policy(MatchPolicy::FirstMatch);
    let mut ctx = StepContext::new(invoker);
    ctx.insert("log", &log);
    let result = ctx.steps(snippet);
    drop(ctx);
    (result, log.into_inner())
}

#[rstest]
fn runs_tables_and_doc_strings(registry: Registry) {
    let snippet = concat!(
        "Given a cart with:\n",
        "  | item  |\n",
        "  | apple |\n",
        "  | pear  |\n",
        "When I leave a note:\n",
        "  \"\"\"\n",
        "  ring twice\n",
        "  \"\"\"\n",
        "Then I check out",
    );
    let (result, log) = run(&registry, snippet);
    assert_step_ok!(result);
    assert_eq!(log, ["item apple", "item pear", "note ring twice", "checkout"]);
}

#[rstest]
fn grammar_errors_run_nothing(registry: Registry) {
    let (result, log) = run(&registry, "Then I check out\nFeature: again");
    let err = assert_step_err!(result);
    assert!(matches!(err, StepError::Parse(_)));
    assert!(log.is_empty());
}
