//! Room hub: the single task that owns a room's membership.
//!
//! Every membership change and every publish is a [`HubRequest`] processed
//! one at a time by [`RoomHub::run`]. Nothing else touches the member list,
//! so no locks are needed and all members observe one global message order.

mod client;
mod config;
mod handle;

use std::sync::Arc;

use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

pub use client::{ClientHandle, MemberInfo, OutboundQueue};
pub use config::{DEFAULT_OUTBOUND_CAPACITY, DEFAULT_REQUEST_CAPACITY, FanoutPolicy, RoomConfig};
pub use handle::{HubError, RoomHandle};

use crate::domain::{ConnectionId, Message, MessageSink};

/// Requests the hub processes, in arrival order.
#[derive(Debug)]
pub enum HubRequest {
    /// Add a member. Subsequent publishes reach it.
    Join(ClientHandle),
    /// Remove a member and close its outbound queue. No-op when absent.
    Leave(ConnectionId),
    /// Persist a message, then hand a copy to every member.
    Publish(Message),
    /// Report the current members without changing anything.
    Members(oneshot::Sender<Vec<MemberInfo>>),
}

pub struct RoomHub {
    config: RoomConfig,
    members: Vec<ClientHandle>,
    sink: Arc<dyn MessageSink>,
    requests: mpsc::Receiver<HubRequest>,
}

impl RoomHub {
    /// Create a hub and the handle used to talk to it.
    ///
    /// The hub does nothing until [`RoomHub::run`] is polled.
    pub fn new(config: RoomConfig, sink: Arc<dyn MessageSink>) -> (Self, RoomHandle) {
        let (requests_tx, requests_rx) = mpsc::channel(config.request_capacity.max(1));
        let handle = RoomHandle::new(config.name.clone(), config.outbound_capacity, requests_tx);
        let hub = Self {
            config,
            members: Vec::new(),
            sink,
            requests: requests_rx,
        };
        (hub, handle)
    }

    /// Process requests until every [`RoomHandle`] is dropped.
    pub async fn run(mut self) {
        tracing::info!("Room '{}' hub started", self.config.name);
        while let Some(request) = self.requests.recv().await {
            self.handle(request).await;
        }
        tracing::info!("Room '{}' hub stopped", self.config.name);
    }

    /// Apply one request to the room.
    pub async fn handle(&mut self, request: HubRequest) {
        match request {
            HubRequest::Join(client) => self.join(client),
            HubRequest::Leave(connection_id) => self.leave(connection_id),
            HubRequest::Publish(message) => self.publish(message).await,
            HubRequest::Members(reply) => {
                let members = self.members.iter().map(ClientHandle::info).collect();
                // the asker may have given up; nothing to do then
                let _ = reply.send(members);
            }
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, connection_id: ConnectionId) -> bool {
        self.members
            .iter()
            .any(|client| client.connection_id() == connection_id)
    }

    fn join(&mut self, client: ClientHandle) {
        tracing::info!(
            "Client '{}' ({}) joined room '{}' (members: {})",
            client.identity(),
            client.connection_id(),
            self.config.name,
            self.members.len() + 1
        );
        self.members.push(client);
    }

    fn leave(&mut self, connection_id: ConnectionId) {
        let Some(index) = self
            .members
            .iter()
            .position(|client| client.connection_id() == connection_id)
        else {
            tracing::debug!("Leave for unknown connection {} ignored", connection_id);
            return;
        };

        // Dropping the handle closes its outbound queue.
        let client = self.members.remove(index);
        tracing::info!(
            "Client '{}' ({}) left room '{}' (members: {})",
            client.identity(),
            connection_id,
            self.config.name,
            self.members.len()
        );
    }

    async fn publish(&mut self, message: Message) {
        tracing::debug!(
            "Message received from '{}': {}",
            message.author(),
            message.body()
        );

        if let Err(e) = self.sink.append(&message).await {
            tracing::warn!(
                "Failed to persist message from '{}' in room '{}': {}",
                message.author(),
                self.config.name,
                e
            );
        }

        for client in &self.members {
            match self.config.fanout {
                FanoutPolicy::Block => {
                    if client.outbound().send(message.clone()).await.is_err() {
                        tracing::debug!(
                            "Outbound pump of {} already gone, skipping",
                            client.connection_id()
                        );
                        continue;
                    }
                }
                FanoutPolicy::DropWhenFull => match client.outbound().try_send(message.clone()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(
                            "Outbound queue of '{}' ({}) is full, message dropped",
                            client.identity(),
                            client.connection_id()
                        );
                        continue;
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::debug!(
                            "Outbound pump of {} already gone, skipping",
                            client.connection_id()
                        );
                        continue;
                    }
                },
            }
            tracing::debug!(" -- sent to '{}'", client.identity());
        }
    }
}

/// Spawn a hub for `config` on the current tokio runtime.
pub fn spawn_room(config: RoomConfig, sink: Arc<dyn MessageSink>) -> RoomHandle {
    let (hub, handle) = RoomHub::new(config, sink);
    tokio::spawn(hub.run());
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, MessageContent, MockMessageSink, RoomName, SinkError, Timestamp};

    fn accepting_sink() -> Arc<dyn MessageSink> {
        let mut sink = MockMessageSink::new();
        sink.expect_append().returning(|_| Ok(()));
        Arc::new(sink)
    }

    fn room_config() -> RoomConfig {
        RoomConfig::new(RoomName::new("RoomA".to_string()).unwrap())
    }

    fn client(name: &str, capacity: usize) -> (ClientHandle, OutboundQueue) {
        ClientHandle::new(ClientId::new(name.to_string()).unwrap(), capacity)
    }

    fn message(author: &str, body: &str, at: i64) -> Message {
        Message::new(
            ClientId::new(author.to_string()).unwrap(),
            MessageContent::new(body.to_string()).unwrap(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_join_and_leave_membership() {
        // テスト項目: Join/Leave の結果、メンバー集合は join から leave を引いたものになる
        // given (前提条件):
        let (mut hub, _handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, _alice_rx) = client("alice", 8);
        let (bob, _bob_rx) = client("bob", 8);
        let (charlie, _charlie_rx) = client("charlie", 8);
        let (alice_id, bob_id, charlie_id) = (
            alice.connection_id(),
            bob.connection_id(),
            charlie.connection_id(),
        );

        // when (操作):
        hub.handle(HubRequest::Join(alice)).await;
        hub.handle(HubRequest::Join(bob)).await;
        hub.handle(HubRequest::Join(charlie)).await;
        hub.handle(HubRequest::Leave(bob_id)).await;

        // then (期待する結果):
        assert_eq!(hub.member_count(), 2);
        assert!(hub.is_member(alice_id));
        assert!(!hub.is_member(bob_id));
        assert!(hub.is_member(charlie_id));
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        // テスト項目: 同じ接続に対する2回目の Leave は何もしない
        // given (前提条件):
        let (mut hub, _handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, _alice_rx) = client("alice", 8);
        let (bob, _bob_rx) = client("bob", 8);
        let alice_id = alice.connection_id();
        hub.handle(HubRequest::Join(alice)).await;
        hub.handle(HubRequest::Join(bob)).await;

        // when (操作):
        hub.handle(HubRequest::Leave(alice_id)).await;
        hub.handle(HubRequest::Leave(alice_id)).await;
        hub.handle(HubRequest::Leave(ConnectionId::generate())).await;

        // then (期待する結果): bob だけが残る
        assert_eq!(hub.member_count(), 1);
        assert!(!hub.is_member(alice_id));
    }

    #[tokio::test]
    async fn test_leave_closes_outbound_queue() {
        // テスト項目: Leave するとそのクライアントの送信キューが閉じられる
        // given (前提条件):
        let (mut hub, _handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, mut alice_rx) = client("alice", 8);
        let alice_id = alice.connection_id();
        hub.handle(HubRequest::Join(alice)).await;

        // when (操作):
        hub.handle(HubRequest::Leave(alice_id)).await;

        // then (期待する結果):
        assert!(alice_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_publish_scenario_with_two_clients() {
        // テスト項目: A と B が参加中の "hi" は両者に1回ずつ届き、B 退出後の "bye" は A のみに届く
        // given (前提条件):
        let (mut hub, _handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, mut alice_rx) = client("alice", 8);
        let (bob, mut bob_rx) = client("bob", 8);
        let bob_id = bob.connection_id();
        hub.handle(HubRequest::Join(alice)).await;
        hub.handle(HubRequest::Join(bob)).await;

        // when (操作): alice が "hi" を送信
        let hi = message("alice", "hi", 1000);
        hub.handle(HubRequest::Publish(hi.clone())).await;

        // then (期待する結果): 両者の送信キューに1回ずつ入る
        assert_eq!(alice_rx.try_recv().unwrap(), hi);
        assert_eq!(bob_rx.try_recv().unwrap(), hi);
        assert!(alice_rx.try_recv().is_err());
        assert!(bob_rx.try_recv().is_err());

        // when (操作): bob が退出し、alice が "bye" を送信
        hub.handle(HubRequest::Leave(bob_id)).await;
        let bye = message("alice", "bye", 2000);
        hub.handle(HubRequest::Publish(bye.clone())).await;

        // then (期待する結果): alice のみが受信し、bob のキューは閉じている
        assert_eq!(alice_rx.try_recv().unwrap(), bye);
        assert!(bob_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_fanout_continues_when_persistence_fails() {
        // テスト項目: 永続化が常に失敗しても全メンバーに配信される
        // given (前提条件):
        let mut sink = MockMessageSink::new();
        sink.expect_append()
            .times(2)
            .returning(|_| Err(SinkError::CapacityExceeded { capacity: 0 }));
        let (mut hub, _handle) = RoomHub::new(room_config(), Arc::new(sink));
        let (alice, mut alice_rx) = client("alice", 8);
        let (bob, mut bob_rx) = client("bob", 8);
        hub.handle(HubRequest::Join(alice)).await;
        hub.handle(HubRequest::Join(bob)).await;

        // when (操作):
        let first = message("alice", "first", 1);
        let second = message("bob", "second", 2);
        hub.handle(HubRequest::Publish(first.clone())).await;
        hub.handle(HubRequest::Publish(second.clone())).await;

        // then (期待する結果):
        assert_eq!(alice_rx.try_recv().unwrap(), first);
        assert_eq!(alice_rx.try_recv().unwrap(), second);
        assert_eq!(bob_rx.try_recv().unwrap(), first);
        assert_eq!(bob_rx.try_recv().unwrap(), second);
    }

    #[tokio::test]
    async fn test_publish_skips_member_whose_pump_is_gone() {
        // テスト項目: 送信ポンプが終了したメンバーがいても他のメンバーへの配信は続く
        // given (前提条件):
        let (mut hub, _handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, alice_rx) = client("alice", 1);
        let (bob, mut bob_rx) = client("bob", 1);
        hub.handle(HubRequest::Join(alice)).await;
        hub.handle(HubRequest::Join(bob)).await;
        drop(alice_rx);

        // when (操作):
        let hi = message("bob", "hi", 1);
        hub.handle(HubRequest::Publish(hi.clone())).await;

        // then (期待する結果): alice はメンバーのまま、bob には届く
        assert_eq!(hub.member_count(), 2);
        assert_eq!(bob_rx.try_recv().unwrap(), hi);
    }

    #[tokio::test]
    async fn test_blocking_fanout_preserves_order_under_backpressure() {
        // テスト項目: 送信キューが満杯でも、遅いクライアントを含め全員が同じ順序で全件受信する
        // given (前提条件): 送信キュー容量 1、alice はしばらく読まない
        let config = room_config().with_outbound_capacity(1);
        let handle = spawn_room(config, accepting_sink());
        let (alice, mut alice_rx) = client("alice", handle.outbound_capacity());
        let (bob, mut bob_rx) = client("bob", handle.outbound_capacity());
        handle.join(alice).await.unwrap();
        handle.join(bob).await.unwrap();

        let bodies = ["one", "two", "three"];
        let bob_reader = tokio::spawn(async move {
            let mut received = Vec::new();
            for _ in 0..3 {
                received.push(bob_rx.recv().await.unwrap());
            }
            received
        });

        // when (操作):
        for (i, body) in bodies.iter().enumerate() {
            handle.publish(message("carol", body, i as i64)).await.unwrap();
        }
        let mut alice_received = Vec::new();
        for _ in 0..3 {
            alice_received.push(alice_rx.recv().await.unwrap());
        }
        let bob_received = bob_reader.await.unwrap();

        // then (期待する結果):
        let alice_bodies: Vec<_> = alice_received.iter().map(|m| m.body().as_str()).collect();
        let bob_bodies: Vec<_> = bob_received.iter().map(|m| m.body().as_str()).collect();
        assert_eq!(alice_bodies, bodies);
        assert_eq!(bob_bodies, bodies);
    }

    #[tokio::test]
    async fn test_drop_when_full_skips_only_the_stalled_recipient() {
        // テスト項目: DropWhenFull では満杯の受信者だけが取りこぼし、他の受信者は順序通り全件受信する
        // given (前提条件):
        let config = room_config().with_fanout(FanoutPolicy::DropWhenFull);
        let (mut hub, _handle) = RoomHub::new(config, accepting_sink());
        let (slow, mut slow_rx) = client("slow", 1);
        let (fast, mut fast_rx) = client("fast", 1);
        hub.handle(HubRequest::Join(slow)).await;
        hub.handle(HubRequest::Join(fast)).await;

        // when (操作): fast だけが毎回読み出す
        let first = message("carol", "first", 1);
        let second = message("carol", "second", 2);
        hub.handle(HubRequest::Publish(first.clone())).await;
        let fast_first = fast_rx.try_recv().unwrap();
        hub.handle(HubRequest::Publish(second.clone())).await;
        let fast_second = fast_rx.try_recv().unwrap();

        // then (期待する結果):
        assert_eq!(fast_first, first);
        assert_eq!(fast_second, second);
        assert_eq!(slow_rx.try_recv().unwrap(), first);
        assert!(slow_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_members_reports_join_order() {
        // テスト項目: Members リクエストは参加順のメンバー一覧を返し、状態を変更しない
        // given (前提条件):
        let handle = spawn_room(room_config(), accepting_sink());
        let (charlie, _charlie_rx) = client("charlie", 8);
        let (alice, _alice_rx) = client("alice", 8);
        handle.join(charlie).await.unwrap();
        handle.join(alice).await.unwrap();

        // when (操作):
        let members = handle.members().await.unwrap();
        let again = handle.members().await.unwrap();

        // then (期待する結果):
        let names: Vec<_> = members.iter().map(|m| m.client_id.as_str()).collect();
        assert_eq!(names, ["charlie", "alice"]);
        assert_eq!(members, again);
    }

    #[tokio::test]
    async fn test_hub_stops_when_all_handles_dropped() {
        // テスト項目: すべての RoomHandle が破棄されると Hub タスクは終了する
        // given (前提条件):
        let (hub, handle) = RoomHub::new(room_config(), accepting_sink());
        let task = tokio::spawn(hub.run());

        // when (操作):
        drop(handle);

        // then (期待する結果):
        assert!(task.await.is_ok());
    }

    #[tokio::test]
    async fn test_handle_reports_unavailable_after_hub_stops() {
        // テスト項目: Hub 停止後の要求は HubError::Unavailable になる
        // given (前提条件):
        let (hub, handle) = RoomHub::new(room_config(), accepting_sink());
        drop(hub);
        let (alice, _alice_rx) = client("alice", 8);

        // when (操作):
        let result = handle.join(alice).await;

        // then (期待する結果):
        assert_eq!(result, Err(HubError::Unavailable("RoomA".to_string())));
        assert!(handle.members().await.is_err());
        assert!(handle.publish(message("alice", "hi", 1)).await.is_err());
    }

    #[tokio::test]
    async fn test_requests_are_processed_in_arrival_order() {
        // テスト項目: Hub 起動前に publish → join → leave の順で積まれた要求は、その順序で処理される
        // given (前提条件): alice は参加済み、Hub はまだ動いていない
        let (hub, handle) = RoomHub::new(room_config(), accepting_sink());
        let (alice, mut alice_rx) = client("alice", 8);
        let (late, mut late_rx) = client("late", 8);
        let alice_id = alice.connection_id();
        handle.join(alice).await.unwrap();

        // when (操作):
        let before_join = message("bob", "before-join", 1);
        handle.publish(before_join.clone()).await.unwrap();
        handle.join(late).await.unwrap();
        handle.leave(alice_id).await.unwrap();
        tokio::spawn(hub.run());

        // then (期待する結果): alice は退出前のメッセージを受け取ってから閉じられ、
        // 後から参加した late には参加前のメッセージが届かない
        assert_eq!(alice_rx.recv().await, Some(before_join));
        assert!(alice_rx.recv().await.is_none());
        let members = handle.members().await.unwrap();
        let names: Vec<_> = members.iter().map(|m| m.client_id.as_str()).collect();
        assert_eq!(names, ["late"]);
        assert!(late_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_members_request_does_not_overtake_publish() {
        // テスト項目: publish の後に送った Members 要求の応答時点で、その publish は配信済みである
        // given (前提条件):
        let handle = spawn_room(room_config(), accepting_sink());
        let (alice, mut alice_rx) = client("alice", 8);
        handle.join(alice).await.unwrap();

        // when (操作):
        let hi = message("alice", "hi", 1);
        handle.publish(hi.clone()).await.unwrap();
        handle.members().await.unwrap();

        // then (期待する結果):
        assert_eq!(alice_rx.try_recv().unwrap(), hi);
    }

    #[tokio::test]
    async fn test_detached_leave_waits_for_room_in_full_queue() {
        // テスト項目: 要求キューが満杯でも leave_detached の退出は後から必ず処理される
        // given (前提条件): 要求キュー容量 1 で、Hub 起動前に1件積んで満杯にする
        let config = room_config().with_request_capacity(1);
        let (hub, handle) = RoomHub::new(config, accepting_sink());
        let (alice, mut alice_rx) = client("alice", 8);
        let alice_id = alice.connection_id();
        handle.join(alice).await.unwrap();

        // when (操作):
        let result = handle.leave_detached(alice_id);
        tokio::spawn(hub.run());

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(alice_rx.recv().await.is_none());
        assert!(handle.members().await.unwrap().is_empty());
    }
}
