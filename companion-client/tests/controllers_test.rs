use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use companion_client::{
    ChatController, ClientError, CompanionApi, ControllerState, DevotionalController,
    JournalController, NotificationKind,
    api_client::{
        ChatReply, ChatRequest, DevotionalReply, DevotionalRequest, JournalAction, JournalReply,
        JournalRequest,
    },
    controllers::chat_controller::Role,
};

/// In-memory stand-in for the proxy endpoints.
#[derive(Default)]
struct FakeApi {
    calls: AtomicUsize,
    fail: bool,
    chat_requests: Mutex<Vec<ChatRequest>>,
    devotional_requests: Mutex<Vec<DevotionalRequest>>,
    journal_requests: Mutex<Vec<JournalRequest>>,
}

impl FakeApi {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome<T>(&self, function: &'static str, ok: T) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClientError::Status {
                function,
                status: 500,
                message: "Failed".into(),
            });
        }
        Ok(ok)
    }
}

#[async_trait]
impl CompanionApi for FakeApi {
    async fn chat(&self, req: ChatRequest) -> Result<ChatReply, ClientError> {
        let n = self.chat_requests.lock().unwrap().len();
        self.chat_requests.lock().unwrap().push(req);
        self.outcome(
            "gloo-chat",
            ChatReply {
                chat_id: Some(format!("chat-{n}")),
                message_id: Some(format!("msg-{n}")),
                message: Some(format!("answer {n}")),
                suggestions: if n == 0 {
                    vec!["Tell me more".into(), "Any verses?".into()]
                } else {
                    Vec::new()
                },
                sources: Vec::new(),
            },
        )
    }

    async fn devotional(&self, req: DevotionalRequest) -> Result<DevotionalReply, ClientError> {
        self.devotional_requests.lock().unwrap().push(req);
        self.outcome(
            "gloo-devotional",
            DevotionalReply {
                devotional: Some("Be still.".into()),
            },
        )
    }

    async fn journal(&self, req: JournalRequest) -> Result<JournalReply, ClientError> {
        self.journal_requests.lock().unwrap().push(req);
        self.outcome(
            "gloo-journal",
            JournalReply {
                result: Some("Reflect on this.".into()),
            },
        )
    }
}

/* ------------------------------------------------------------------------- */
/* Chat                                                                      */
/* ------------------------------------------------------------------------- */

#[tokio::test]
async fn chat_reuses_first_chat_id() {
    let api = FakeApi::default();
    let mut chat = ChatController::new();

    chat.set_input("What is faith?");
    assert!(chat.send(&api).await);
    assert_eq!(chat.chat_id(), Some("chat-0"));

    chat.set_input("And hope?");
    assert!(chat.send(&api).await);

    let sent = api.chat_requests.lock().unwrap().clone();
    assert_eq!(sent[0].chat_id, None);
    assert_eq!(sent[1].chat_id.as_deref(), Some("chat-0"));
    // The handle from the first turn is kept.
    assert_eq!(chat.chat_id(), Some("chat-0"));
}

#[tokio::test]
async fn transcript_keeps_send_order() {
    let api = FakeApi::default();
    let mut chat = ChatController::new();

    for q in ["one", "two"] {
        chat.set_input(q);
        chat.send(&api).await;
    }

    let turns: Vec<_> = chat
        .transcript()
        .iter()
        .map(|t| (t.role, t.content.as_str()))
        .collect();
    assert_eq!(
        turns,
        [
            (Role::User, "one"),
            (Role::Assistant, "answer 0"),
            (Role::User, "two"),
            (Role::Assistant, "answer 1"),
        ]
    );
    assert_eq!(chat.input(), "");
    assert_eq!(chat.state(), ControllerState::Success);
}

#[tokio::test]
async fn second_send_while_in_flight_is_ignored() {
    let api = FakeApi::default();
    let mut chat = ChatController::new();

    chat.set_input("first");
    let pending = chat.begin_send(None).expect("first send starts");
    assert_eq!(chat.state(), ControllerState::Submitting);

    chat.set_input("second");
    assert!(!chat.can_send());
    assert!(!chat.send(&api).await);
    assert_eq!(api.calls(), 0);

    let reply = api.chat(pending).await;
    chat.complete_send(reply);
    assert_eq!(api.calls(), 1);
    assert!(chat.can_send());
}

#[tokio::test]
async fn suggestions_are_cleared_on_next_send() {
    let api = FakeApi::default();
    let mut chat = ChatController::new();

    chat.set_input("start");
    chat.send(&api).await;
    assert_eq!(chat.suggestions().len(), 2);

    assert!(chat.send_suggestion(&api, 1).await);
    assert_eq!(api.chat_requests.lock().unwrap()[1].query, "Any verses?");
    assert!(chat.suggestions().is_empty());
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let api = FakeApi::default();
    let mut chat = ChatController::new();
    chat.set_input("   ");
    assert!(!chat.can_send());
    assert!(!chat.send(&api).await);
    assert_eq!(api.calls(), 0);
    assert!(chat.transcript().is_empty());
}

#[tokio::test]
async fn chat_error_notifies_and_returns_to_idle() {
    let api = FakeApi::failing();
    let mut chat = ChatController::new();

    chat.set_input("hello");
    chat.send(&api).await;
    assert_eq!(chat.state(), ControllerState::Error);
    let toast = chat.notification().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.description, "Failed to send message. Please try again.");

    chat.dismiss_notification();
    assert_eq!(chat.state(), ControllerState::Idle);
    assert!(chat.notification().is_none());
}

#[test]
fn missing_message_adds_no_assistant_turn() {
    let mut chat = ChatController::new();
    chat.set_input("hi");
    chat.begin_send(None).unwrap();
    chat.complete_send(Ok(ChatReply::default()));
    assert_eq!(chat.transcript().len(), 1);
    assert_eq!(chat.state(), ControllerState::Success);
}

/* ------------------------------------------------------------------------- */
/* Devotional                                                                */
/* ------------------------------------------------------------------------- */

#[tokio::test]
async fn devotional_needs_topic_or_verse() {
    let api = FakeApi::default();
    let mut page = DevotionalController::new();

    assert!(!page.generate(&api).await);
    assert_eq!(api.calls(), 0);
    assert_eq!(page.notification().unwrap().title, "Input required");
    assert_eq!(page.state(), ControllerState::Idle);
}

#[tokio::test]
async fn devotional_sends_only_filled_fields() {
    let api = FakeApi::default();
    let mut page = DevotionalController::new();
    page.set_verse_reference("Psalm 46:10");

    assert!(page.generate(&api).await);
    assert_eq!(page.devotional(), Some("Be still."));
    assert_eq!(page.notification().unwrap().title, "Devotional generated!");

    let sent = api.devotional_requests.lock().unwrap().clone();
    assert_eq!(sent[0].topic, None);
    assert_eq!(sent[0].verse_reference.as_deref(), Some("Psalm 46:10"));
}

#[tokio::test]
async fn devotional_double_submit_is_blocked() {
    let api = FakeApi::default();
    let mut page = DevotionalController::new();
    page.set_topic("peace");

    let _pending = page.begin_generate().unwrap();
    assert!(!page.can_generate());
    assert!(!page.generate(&api).await);
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn missing_input_while_in_flight_leaves_notification_alone() {
    let api = FakeApi::default();
    let mut page = DevotionalController::new();
    page.set_topic("peace");
    let _pending = page.begin_generate().unwrap();

    page.set_topic("");
    assert!(!page.generate(&api).await);
    assert!(page.notification().is_none());
    assert_eq!(page.state(), ControllerState::Submitting);
    assert_eq!(api.calls(), 0);
}

/* ------------------------------------------------------------------------- */
/* Journal                                                                   */
/* ------------------------------------------------------------------------- */

#[tokio::test]
async fn reflect_and_prayer_need_an_entry() {
    let api = FakeApi::default();
    let mut journal = JournalController::new();

    assert!(!journal.can_run(JournalAction::Reflect));
    assert!(!journal.run(&api, JournalAction::Prayer).await);
    assert_eq!(journal.notification().unwrap().title, "Entry required");
    assert_eq!(api.calls(), 0);

    assert!(journal.can_run(JournalAction::Prompt));
    assert!(journal.run(&api, JournalAction::Prompt).await);
    assert_eq!(api.calls(), 1);
    assert_eq!(
        api.journal_requests.lock().unwrap()[0].journal_entry,
        None
    );
}

#[tokio::test]
async fn journal_entry_is_trimmed_and_result_shown() {
    let api = FakeApi::default();
    let mut journal = JournalController::new();
    journal.set_entry("  Thankful for today.  ");

    assert!(journal.run(&api, JournalAction::Reflect).await);
    assert_eq!(journal.result(), Some("Reflect on this."));
    assert_eq!(journal.notification().unwrap().title, "Reflection generated!");

    let sent = api.journal_requests.lock().unwrap().clone();
    assert_eq!(sent[0].action, JournalAction::Reflect);
    assert_eq!(sent[0].journal_entry.as_deref(), Some("Thankful for today."));
}

#[tokio::test]
async fn entry_check_is_skipped_while_in_flight() {
    let api = FakeApi::default();
    let mut journal = JournalController::new();
    journal.set_entry("Thankful.");
    let _pending = journal.begin_action(JournalAction::Reflect).unwrap();

    journal.set_entry("");
    assert!(!journal.run(&api, JournalAction::Prayer).await);
    assert!(journal.notification().is_none());
    assert_eq!(journal.state(), ControllerState::Submitting);
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn journal_error_is_generic() {
    let api = FakeApi::failing();
    let mut journal = JournalController::new();
    journal.set_entry("entry");

    journal.run(&api, JournalAction::Prayer).await;
    assert_eq!(journal.state(), ControllerState::Error);
    assert_eq!(
        journal.notification().unwrap().description,
        "Failed to process request. Please try again."
    );
    assert!(journal.can_run(JournalAction::Prayer));
}
