//! Live game sessions and the participant index that routes move presses.
//!
//! Each user has at most one active session. Starting or joining a new game
//! evicts the old one; evicting a two-player game drops it for both sides.

use std::collections::HashMap;

use rand::Rng;
use teloxide::types::{ChatId, MessageId, UserId};

use super::board::{Board, Mark};
use super::opponent::{self, OpponentStrategy};
use crate::constants::INVITE_ID_LEN;
use crate::util::random_code;

/// Where a participant's active game lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    Solo(ChatId),
    Paired(String),
}

/// Why a move was rejected. Rejections never change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    Occupied,
    /// Carries the display name of whoever actually holds the turn.
    NotYourTurn { holder: String },
}

/// Result of a full solo turn: the human move plus the scripted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoloOutcome {
    HumanWin,
    OpponentWin,
    Draw,
    Continue,
}

/// Result of one move in a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedOutcome {
    Win(Mark),
    Draw,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Unknown, expired, or already-claimed invite id.
    Unknown,
    /// The creator tried to join their own invite.
    SelfJoin,
}

/// A game against the scripted opponent. The human plays X.
#[derive(Debug)]
pub struct SoloSession {
    pub owner: UserId,
    pub chat: ChatId,
    /// The board message this session edits in place.
    pub message: MessageId,
    pub board: Board,
}

impl SoloSession {
    pub fn new(owner: UserId, chat: ChatId, message: MessageId) -> Self {
        Self {
            owner,
            chat,
            message,
            board: Board::new(),
        }
    }

    /// Apply the human's move, then the scripted reply if the game goes on.
    /// The outcome is checked after each half of the turn.
    pub fn play_turn(
        &mut self,
        cell: usize,
        strategy: OpponentStrategy,
        rng: &mut impl Rng,
    ) -> Result<SoloOutcome, MoveError> {
        if !self.board.place(cell, Mark::X) {
            return Err(MoveError::Occupied);
        }
        if self.board.winner() == Some(Mark::X) {
            return Ok(SoloOutcome::HumanWin);
        }
        if self.board.is_full() {
            return Ok(SoloOutcome::Draw);
        }
        if let Some(reply) = opponent::choose_cell(&self.board, strategy, rng) {
            self.board.place(reply, Mark::O);
        }
        if self.board.winner() == Some(Mark::O) {
            return Ok(SoloOutcome::OpponentWin);
        }
        if self.board.is_full() {
            return Ok(SoloOutcome::Draw);
        }
        Ok(SoloOutcome::Continue)
    }
}

/// One side of a two-player game, with the chat and message its board view
/// lives in.
#[derive(Debug, Clone)]
pub struct Participant {
    pub user: UserId,
    pub name: String,
    pub chat: ChatId,
    pub message: MessageId,
}

/// A two-player game played across two private chats. The invite creator is
/// X and moves first; turns alternate strictly.
#[derive(Debug)]
pub struct PairedSession {
    pub id: String,
    pub board: Board,
    pub x: Participant,
    pub o: Participant,
    pub turn: Mark,
}

impl PairedSession {
    pub fn participant(&self, mark: Mark) -> &Participant {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    pub fn mark_of(&self, user: UserId) -> Option<Mark> {
        if self.x.user == user {
            Some(Mark::X)
        } else if self.o.user == user {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn turn_holder(&self) -> &Participant {
        self.participant(self.turn)
    }

    pub fn apply_move(&mut self, user: UserId, cell: usize) -> Result<PairedOutcome, MoveError> {
        let holds_turn = self.mark_of(user) == Some(self.turn);
        if !holds_turn {
            return Err(MoveError::NotYourTurn {
                holder: self.turn_holder().name.clone(),
            });
        }
        let mark = self.turn;
        if !self.board.place(cell, mark) {
            return Err(MoveError::Occupied);
        }
        if self.board.winner() == Some(mark) {
            return Ok(PairedOutcome::Win(mark));
        }
        if self.board.is_full() {
            return Ok(PairedOutcome::Draw);
        }
        self.turn = mark.other();
        Ok(PairedOutcome::Continue)
    }
}

/// An issued invite waiting for a second player.
#[derive(Debug, Clone)]
pub struct PendingInvite {
    pub id: String,
    pub creator: UserId,
    pub creator_name: String,
    /// Chat where the creator's board message will be sent on join.
    pub chat: ChatId,
}

#[derive(Debug, Default)]
pub struct GameStore {
    solo: HashMap<ChatId, SoloSession>,
    paired: HashMap<String, PairedSession>,
    invites: HashMap<String, PendingInvite>,
    index: HashMap<UserId, SessionKey>,
}

impl GameStore {
    pub fn session_key(&self, user: UserId) -> Option<&SessionKey> {
        self.index.get(&user)
    }

    pub fn solo_mut(&mut self, chat: ChatId) -> Option<&mut SoloSession> {
        self.solo.get_mut(&chat)
    }

    pub fn paired_mut(&mut self, id: &str) -> Option<&mut PairedSession> {
        self.paired.get_mut(id)
    }

    pub fn invite(&self, id: &str) -> Option<&PendingInvite> {
        self.invites.get(id)
    }

    /// Register a fresh solo game, replacing whatever game the owner (or a
    /// previous game in this chat) had.
    pub fn start_solo(&mut self, session: SoloSession) {
        let owner = session.owner;
        let chat = session.chat;
        self.evict(owner);
        if let Some(previous) = self.solo.insert(chat, session)
            && previous.owner != owner
        {
            self.index.remove(&previous.owner);
        }
        self.index.insert(owner, SessionKey::Solo(chat));
    }

    pub fn remove_solo(&mut self, chat: ChatId) -> Option<SoloSession> {
        let session = self.solo.remove(&chat)?;
        self.index.remove(&session.owner);
        Some(session)
    }

    /// Mint an invite id that collides with no live invite or game.
    pub fn create_invite(
        &mut self,
        creator: UserId,
        creator_name: String,
        chat: ChatId,
        rng: &mut impl Rng,
    ) -> String {
        loop {
            let id = random_code(rng, INVITE_ID_LEN);
            if self.paired.contains_key(&id) || self.invites.contains_key(&id) {
                continue;
            }
            self.invites.insert(
                id.clone(),
                PendingInvite {
                    id: id.clone(),
                    creator,
                    creator_name,
                    chat,
                },
            );
            return id;
        }
    }

    /// Claim an invite for `joiner`. The invite is only removed on success;
    /// a self-join leaves it open for someone else.
    pub fn claim_invite(&mut self, id: &str, joiner: UserId) -> Result<PendingInvite, JoinError> {
        let Some(invite) = self.invites.remove(id) else {
            return Err(JoinError::Unknown);
        };
        if invite.creator == joiner {
            self.invites.insert(id.to_owned(), invite);
            return Err(JoinError::SelfJoin);
        }
        Ok(invite)
    }

    /// Put a claimed invite back, for when game setup fails after the claim.
    pub fn restore_invite(&mut self, invite: PendingInvite) {
        self.invites.insert(invite.id.clone(), invite);
    }

    /// Register a two-player game, evicting any session either side had.
    pub fn insert_paired(&mut self, session: PairedSession) {
        self.evict(session.x.user);
        self.evict(session.o.user);
        self.index
            .insert(session.x.user, SessionKey::Paired(session.id.clone()));
        self.index
            .insert(session.o.user, SessionKey::Paired(session.id.clone()));
        self.paired.insert(session.id.clone(), session);
    }

    pub fn remove_paired(&mut self, id: &str) -> Option<PairedSession> {
        let session = self.paired.remove(id)?;
        self.index.remove(&session.x.user);
        self.index.remove(&session.o.user);
        Some(session)
    }

    fn evict(&mut self, user: UserId) {
        match self.index.remove(&user) {
            Some(SessionKey::Solo(chat)) => {
                self.solo.remove(&chat);
            }
            Some(SessionKey::Paired(id)) => {
                if let Some(game) = self.paired.remove(&id) {
                    self.index.remove(&game.x.user);
                    self.index.remove(&game.o.user);
                }
            }
            None => {}
        }
    }
}
