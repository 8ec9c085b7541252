//! Behavioural tests for steps that call other steps.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use nested_steps::{
    DocString, MatchPolicy, RawArgument, Registry, SnippetParser, StepArgument, StepContext,
    StepError, StepInvoker, StepKeyword, Table, assert_step_err, assert_step_ok,
    assert_step_undefined,
};
use rstest::{fixture, rstest};

/// Everything the steps below did, in order.
#[derive(Default)]
struct World {
    events: RefCell<Vec<String>>,
    tables: RefCell<Vec<Table>>,
    docs: RefCell<Vec<DocString>>,
}

fn world<'a>(ctx: &StepContext<'a>) -> Result<&'a World, StepError> {
    ctx.get::<World>("world")
        .ok_or_else(|| StepError::failed("world fixture missing"))
}

fn record(ctx: &StepContext<'_>, event: String) -> Result<(), StepError> {
    world(ctx)?.events.borrow_mut().push(event);
    Ok(())
}

#[fixture]
fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(StepKeyword::Given, "the user {string} exists", |ctx, input| {
            record(ctx, format!("created {}", input.capture(0).unwrap_or_default()))
        })
        .and_then(|r| {
            r.register(StepKeyword::Given, "I am logged in as {string}", |ctx, input| {
                record(ctx, format!("logged in {}", input.capture(0).unwrap_or_default()))
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Given, "I am logged in as an admin", |ctx, _| {
                ctx.steps("Given the user \"Admin\" exists\nAnd I am logged in as \"Admin\"")
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Given, "these users:", |ctx, input| {
                let table = input
                    .table()
                    .ok_or_else(|| StepError::failed("a table is required"))?;
                world(ctx)?.tables.borrow_mut().push(table.clone());
                for row in table.hashes() {
                    let name = row.get("name").copied().unwrap_or_default();
                    ctx.step(&format!("the user \"{name}\" exists"))?;
                }
                Ok(())
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::When, "I send an email with:", |ctx, input| {
                let doc = input
                    .docstring()
                    .ok_or_else(|| StepError::failed("a doc string is required"))?;
                world(ctx)?.docs.borrow_mut().push(doc.clone());
                Ok(())
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::When, "I forward {string}", |ctx, input| {
                let body = input.capture(0).unwrap_or_default().to_owned();
                ctx.step_with("I send an email with:", DocString::new(body, "text/plain"))
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "the step fails with {string}", |_, input| {
                Err(StepError::failed(input.capture(0).unwrap_or_default()))
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "a nested step fails", |ctx, _| {
                ctx.step("the step fails with \"inner\"")
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "it calls an undefined step", |ctx, _| {
                ctx.step("I am logged in")
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "it counts down from {n:u32}", |ctx, input| {
                let n: u32 = input.parse(0)?;
                record(ctx, format!("count {n}"))?;
                match n.checked_sub(1) {
                    Some(next) => ctx.step(&format!("it counts down from {next}")),
                    None => Ok(()),
                }
            })
        })
        .and_then(|r| {
            r.register(StepKeyword::Then, "it panics", |_, _| panic!("step exploded"))
        })
        .unwrap_or_else(|err| panic!("step patterns compile: {err}"));
    registry
}

/// Run `body` against a fresh context and return what happened.
fn drive(
    registry: &Registry,
    body: impl FnOnce(&mut StepContext<'_>) -> Result<(), StepError>,
) -> (Result<(), StepError>, World) {
    let world = World::default();
    let parser = SnippetParser::english();
    let invoker = StepInvoker::new(registry)
        .with_grammar(&parser)
        .with_policy(MatchPolicy::FirstMatch);
    let mut ctx = StepContext::new(invoker);
    ctx.insert("world", &world);
    let result = body(&mut ctx);
    drop(ctx);
    (result, world)
}

#[rstest]
fn runs_a_snippet_in_order(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| {
        ctx.steps("Given the user \"Susan\" exists\nAnd I am logged in as \"Susan\"")
    });
    assert_step_ok!(result);
    assert_eq!(
        world.events.into_inner(),
        ["created Susan", "logged in Susan"]
    );
}

#[rstest]
fn steps_can_nest_snippets(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| ctx.step("I am logged in as an admin"));
    assert_step_ok!(result);
    assert_eq!(
        world.events.into_inner(),
        ["created Admin", "logged in Admin"]
    );
}

#[rstest]
fn undefined_steps_report_the_exact_text(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| ctx.step("I am logged in"));
    assert_step_undefined!(result, "I am logged in");
    assert!(world.events.into_inner().is_empty());
}

#[rstest]
fn undefined_steps_name_the_call_site(registry: Registry) {
    let (result, _) = drive(&registry, |ctx| ctx.step("I am logged in"));
    let err = assert_step_err!(result, file!());
    let undefined = err
        .as_undefined()
        .unwrap_or_else(|| panic!("expected an undefined step"));
    let site = undefined
        .call_site()
        .unwrap_or_else(|| panic!("call site captured"));
    assert_eq!(site.file, file!());
}

#[rstest]
fn nested_undefined_steps_propagate_unchanged(registry: Registry) {
    let (result, _) = drive(&registry, |ctx| ctx.step("it calls an undefined step"));
    assert_step_undefined!(result, "I am logged in");
}

#[rstest]
fn nested_failures_propagate_unchanged(registry: Registry) {
    let (result, _) = drive(&registry, |ctx| ctx.step("a nested step fails"));
    let err = assert_step_err!(result, "inner");
    assert!(matches!(err, StepError::Failed { ref message } if message == "inner"));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn snippets_stop_at_the_first_failure(registry: Registry, #[case] failing: usize) {
    let lines: Vec<String> = (1..=4)
        .map(|index| {
            if index == failing {
                format!("Then the step fails with \"step {index}\"")
            } else {
                format!("Given the user \"user {index}\" exists")
            }
        })
        .collect();
    let (result, world) = drive(&registry, |ctx| ctx.steps(&lines.join("\n")));
    let err = assert_step_err!(result);
    assert_eq!(err.to_string(), format!("Step failed: step {failing}"));
    let expected: Vec<String> = (1..failing).map(|i| format!("created user {i}")).collect();
    assert_eq!(world.events.into_inner(), expected);
}

#[rstest]
fn malformed_snippets_run_nothing(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| {
        ctx.steps("Given the user \"Susan\" exists\nI am logged in as \"Susan\"")
    });
    let err = assert_step_err!(result, "line 2");
    assert!(matches!(err, StepError::Parse(_)));
    assert!(world.events.into_inner().is_empty());
}

#[rstest]
fn tables_reach_the_step_untouched(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| {
        ctx.steps("Given these users:\n  | name | email |\n  | Matt | matt@matt.com |")
    });
    assert_step_ok!(result);
    assert_eq!(
        world.tables.into_inner(),
        [Table::from(vec![
            vec!["name", "email"],
            vec!["Matt", "matt@matt.com"]
        ])]
    );
    assert_eq!(world.events.into_inner(), ["created Matt"]);
}

#[rstest]
fn tables_can_be_built_from_text(registry: Registry) {
    let table: Table = "| name |\n| Susan |\n| Dave |"
        .parse()
        .unwrap_or_else(|err| panic!("{err}"));
    let (result, world) = drive(&registry, |ctx| ctx.step_with("these users:", table));
    assert_step_ok!(result);
    assert_eq!(world.events.into_inner(), ["created Susan", "created Dave"]);
}

#[rstest]
fn doc_strings_keep_content_and_type(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| {
        ctx.step_with(
            "I send an email with:",
            DocString::new("Dear sir,\nYou've won a prize!\n", "text/plain"),
        )?;
        ctx.steps("When I send an email with:\n  \"\"\"markdown\n  # Hello\n  \"\"\"")?;
        ctx.step("I forward \"FYI\"")
    });
    assert_step_ok!(result);
    assert_eq!(
        world.docs.into_inner(),
        [
            DocString::new("Dear sir,\nYou've won a prize!\n", "text/plain"),
            DocString::new("# Hello", "markdown"),
            DocString::new("FYI", "text/plain"),
        ]
    );
}

#[rstest]
fn missing_arguments_are_reported_by_the_step(registry: Registry) {
    let (result, _) = drive(&registry, |ctx| ctx.step("I send an email with:"));
    assert_step_err!(result, "a doc string is required");
}

#[rstest]
fn recursion_has_no_fixed_limit(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| ctx.step("it counts down from 40"));
    assert_step_ok!(result);
    let events = world.events.into_inner();
    assert_eq!(events.len(), 41);
    assert_eq!(events.last().map(String::as_str), Some("count 0"));
}

#[rstest]
#[should_panic(expected = "step exploded")]
fn panics_unwind_through_the_engine(registry: Registry) {
    let _ = drive(&registry, |ctx| ctx.steps("Given the user \"x\" exists\nThen it panics"));
}

#[rstest]
fn contexts_stay_usable_after_a_caught_panic(registry: Registry) {
    let (result, world) = drive(&registry, |ctx| {
        let caught = catch_unwind(AssertUnwindSafe(|| ctx.step("it panics")));
        assert!(caught.is_err());
        assert_eq!(ctx.depth(), 0);
        ctx.step("the user \"after\" exists")
    });
    assert_step_ok!(result);
    assert_eq!(world.events.into_inner(), ["created after"]);
}

#[test]
fn first_registered_definition_always_wins() {
    let mut registry = Registry::new();
    registry
        .register(StepKeyword::When, "I pay {amount}", |ctx, _| {
            record(ctx, "generic".to_owned())
        })
        .and_then(|r| {
            r.register(StepKeyword::When, "I pay {n:u32}", |ctx, _| {
                record(ctx, "typed".to_owned())
            })
        })
        .unwrap_or_else(|err| panic!("{err}"));
    let (result, world) = drive(&registry, |ctx| {
        ctx.steps("When I pay 5\nAnd I pay 6\nAnd I pay 7")
    });
    assert_step_ok!(result);
    assert_eq!(world.events.into_inner(), ["generic", "generic", "generic"]);
}

#[test]
fn normalised_arguments_match_the_raw_input() {
    let rows = vec![
        vec!["name".to_owned(), "email".to_owned()],
        vec!["Matt".to_owned(), "matt@matt.com".to_owned()],
    ];
    assert_eq!(
        nested_steps::normalize(Some(RawArgument::Table { rows: rows.clone() })),
        StepArgument::Table(Table::new(rows))
    );
}
