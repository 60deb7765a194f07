mod common;

use actix::prelude::*;
use common::{FakeEngine, Harness};
use serial_test::serial;
use std::sync::Arc;
use wdcompat_core::WaitConfig;
use wdcompat_interfaces::{Arg, default_strategies};
use wdcompat_legacy::{
    AliasRegistry, DeprecationEvent, DeprecationNotifier, LegacyCommand, RecipientSubscriber,
};

// --- Collecting actor ---
#[derive(Default)]
struct NoticeCollector {
    seen: Vec<DeprecationEvent>,
}

impl Actor for NoticeCollector {
    type Context = Context<Self>;
}

impl Handler<DeprecationEvent> for NoticeCollector {
    type Result = ();

    fn handle(&mut self, msg: DeprecationEvent, _ctx: &mut Context<Self>) -> Self::Result {
        self.seen.push(msg);
    }
}

#[derive(Message)]
#[rtype(result = "Vec<DeprecationEvent>")]
struct TakeNotices;

impl Handler<TakeNotices> for NoticeCollector {
    type Result = MessageResult<TakeNotices>;

    fn handle(&mut self, _msg: TakeNotices, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(std::mem::take(&mut self.seen))
    }
}

#[actix_rt::test]
async fn actor_subscribers_receive_each_notice_once() {
    let collector = NoticeCollector::default().start();
    let notifier = Arc::new(DeprecationNotifier::new());
    notifier.subscribe(RecipientSubscriber(collector.clone().recipient()));

    let table = AliasRegistry::new(notifier.clone(), WaitConfig::default())
        .build(&default_strategies());
    let mut command = LegacyCommand::new(FakeEngine::new());
    table.apply_to(&mut command);

    command.call("back", vec![]).await.ok();
    command.call("back", vec![]).await.ok();
    command.call("uploadFile", vec![Arg::from("/tmp/a.txt")]).await.ok();

    let seen = collector.send(TakeNotices).await.expect("collector is running");
    let names: Vec<&str> = seen.iter().map(|event| event.name.as_str()).collect();
    assert_eq!(names, vec!["Command#back", "Command#uploadFile"]);
    assert_eq!(seen[0].replacement.as_deref(), Some("Command#goBack"));
    assert!(seen[1].extra.as_deref().is_some_and(|extra| extra.contains("no-op")));
}

#[tokio::test]
async fn unsubscribed_listeners_stop_receiving() {
    let harness = Harness::new(FakeEngine::new());
    let late = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = late.clone();
    let id = harness
        .notifier
        .subscribe(move |event: &DeprecationEvent| sink.lock().push(event.name.clone()));

    harness.call("forward", vec![]).await.ok();
    harness.notifier.unsubscribe(id);
    harness.call("back", vec![]).await.ok();

    assert_eq!(*late.lock(), vec!["Command#forward".to_string()]);
    assert_eq!(harness.event_names(), vec!["Command#forward", "Command#back"]);
}

#[tokio::test]
async fn separate_notifiers_track_symbols_independently() {
    let first = Harness::new(FakeEngine::new());
    let second = Harness::new(FakeEngine::new());

    first.call("title", vec![]).await.ok();
    second.call("title", vec![]).await.ok();

    assert_eq!(first.event_names(), vec!["Command#title"]);
    assert_eq!(second.event_names(), vec!["Command#title"]);
}

#[tokio::test]
async fn reset_lets_symbols_be_announced_again() {
    let harness = Harness::new(FakeEngine::new());

    harness.call("source", vec![]).await.ok();
    harness.notifier.reset();
    harness.call("source", vec![]).await.ok();

    assert_eq!(harness.event_names(), vec!["Command#source", "Command#source"]);
}

#[tokio::test]
#[serial]
async fn global_notifier_is_shared_across_tables() {
    let global = DeprecationNotifier::global();
    global.reset();

    let first = AliasRegistry::new(DeprecationNotifier::global(), WaitConfig::default())
        .build(&default_strategies());
    let second = AliasRegistry::new(DeprecationNotifier::global(), WaitConfig::default())
        .build(&default_strategies());

    let mut a = LegacyCommand::new(FakeEngine::new());
    let mut b = LegacyCommand::new(FakeEngine::new());
    first.apply_to(&mut a);
    second.apply_to(&mut b);

    a.call("maximize", vec![]).await.ok();
    let count = global.warned_count();
    b.call("maximize", vec![]).await.ok();

    assert!(global.has_warned("Command#maximize"));
    assert_eq!(global.warned_count(), count);
    global.reset();
}
