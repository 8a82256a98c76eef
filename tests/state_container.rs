mod common;

use common::session;
use screen_runtime::mvi::{Intent, Reducer, ScreenState};
use screen_runtime::ShutdownError;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Default)]
struct TodoState {
    items: Vec<String>,
    filter: Option<String>,
    applied: u64,
    error: Option<String>,
}

impl ScreenState for TodoState {}

#[derive(Debug, Clone)]
enum TodoIntent {
    Add(String),
    RemoveAt(usize),
    Filter(Option<String>),
    Explode,
}

impl Intent for TodoIntent {}

struct TodoReducer;

impl Reducer for TodoReducer {
    type State = TodoState;
    type Intent = TodoIntent;

    fn reduce(mut state: TodoState, intent: TodoIntent) -> TodoState {
        state.applied += 1;
        match intent {
            TodoIntent::Add(item) => state.items.push(item),
            TodoIntent::RemoveAt(index) => {
                if index < state.items.len() {
                    state.items.remove(index);
                    state.error = None;
                } else {
                    state.error = Some(format!("no item at {}", index));
                }
            }
            TodoIntent::Filter(filter) => state.filter = filter,
            TodoIntent::Explode => panic!("reducer defect"),
        }
        state
    }
}

fn script() -> Vec<TodoIntent> {
    vec![
        TodoIntent::Add("milk".into()),
        TodoIntent::Add("eggs".into()),
        TodoIntent::Filter(Some("e".into())),
        TodoIntent::RemoveAt(5),
        TodoIntent::RemoveAt(0),
        TodoIntent::Add("bread".into()),
    ]
}

#[test]
fn final_state_equals_left_fold_of_reducer() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    for intent in script() {
        container.submit(intent).unwrap();
    }

    let expected = TodoReducer::replay(TodoState::default(), script());
    assert_eq!(container.current(), expected);
    assert_eq!(expected.items, vec!["eggs".to_string(), "bread".to_string()]);
    assert_eq!(expected.error, None);
}

#[test]
fn invalid_payload_is_reported_through_state() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    container.submit(TodoIntent::RemoveAt(3)).unwrap();
    assert_eq!(container.current().error.as_deref(), Some("no item at 3"));
}

#[test]
fn reducer_panic_propagates_and_leaves_state_untouched() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    container.submit(TodoIntent::Add("milk".into())).unwrap();
    let before = container.current();

    let result = catch_unwind(AssertUnwindSafe(|| container.submit(TodoIntent::Explode)));
    assert!(result.is_err());
    assert_eq!(container.current(), before);

    // The gate is released, so the container keeps working.
    container.submit(TodoIntent::Add("eggs".into())).unwrap();
    assert_eq!(container.current().items.len(), 2);
}

#[test]
fn submit_after_teardown_is_rejected() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    session.teardown();
    assert_eq!(
        container.submit(TodoIntent::Add("late".into())),
        Err(ShutdownError)
    );
    assert_eq!(container.current(), TodoState::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_keep_their_own_order() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();

    let mut tasks = Vec::new();
    for caller in 0..4 {
        let container = container.clone();
        tasks.push(tokio::spawn(async move {
            for n in 0..50 {
                container
                    .submit(TodoIntent::Add(format!("{}:{}", caller, n)))
                    .unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let state = container.current();
    assert_eq!(state.applied, 200);
    assert_eq!(state.items.len(), 200);
    for caller in 0..4 {
        let prefix = format!("{}:", caller);
        let seen: Vec<u32> = state
            .items
            .iter()
            .filter_map(|item| item.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn observer_never_sees_snapshots_out_of_order() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    let mut observer = container.observe();

    let writer = {
        let container = container.clone();
        tokio::spawn(async move {
            for n in 0..500 {
                container.submit(TodoIntent::Add(n.to_string())).unwrap();
                if n % 50 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    let mut last = 0;
    while let Some(state) = observer.next().await {
        assert!(state.applied >= last, "snapshot went backwards");
        last = state.applied;
        if last == 500 {
            break;
        }
    }
    writer.await.unwrap();
    assert_eq!(last, 500);
}

#[tokio::test]
async fn late_observer_gets_current_value_immediately() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    container.submit(TodoIntent::Add("milk".into())).unwrap();

    let mut observer = container.observe();
    let first = observer.next().await.unwrap();
    assert_eq!(first.items, vec!["milk".to_string()]);
}

#[tokio::test]
async fn async_work_reenters_through_submit() {
    let session = session("todo");
    let container = session.container::<TodoReducer>();
    let mut observer = container.observe();

    let worker = container.clone();
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        worker.submit(TodoIntent::Add("fetched".into())).unwrap();
    });

    let state = observer
        .wait_for(|state| !state.items.is_empty())
        .await
        .unwrap();
    assert_eq!(state.items, vec!["fetched".to_string()]);
}
