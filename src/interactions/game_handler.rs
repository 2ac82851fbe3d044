//! Mini-game button flows: starting solo games, minting invites, and
//! routing move presses through the participant index.
//!
//! Every handler computes the state transition under the game lock, drops
//! it, and only then edits the board views, so a slow edit never blocks
//! other players' moves.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, Me, MessageId, ParseMode, User, UserId};

use crate::commands::tictactoe::board::{Board, Mark};
use crate::commands::tictactoe::opponent::OpponentStrategy;
use crate::commands::tictactoe::session::{
    JoinError, MoveError, PairedOutcome, PairedSession, Participant, SessionKey, SoloOutcome,
    SoloSession,
};
use crate::commands::tictactoe::ui;
use crate::interactions::{ids, util};
use crate::model::AppState;

const LIMIT_REACHED: &str = "You've hit today's game limit. Come back tomorrow!";

pub async fn handle(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
    me: Me,
    token: String,
) -> ResponseResult<()> {
    let Some(msg) = q.message.as_ref() else {
        util::toast(&bot, &q.id, "That menu has expired. Send /tictactoe again.").await;
        return Ok(());
    };
    let chat = msg.chat.id;

    if token == ids::TTT_SOLO {
        start_solo(&bot, &state, &q, chat).await
    } else if token == ids::TTT_INVITE {
        create_invite(&bot, &state, &q, &me, chat).await
    } else if let Some(cell) = ids::parse_move_cell(&token) {
        apply_move(&bot, &state, &q, cell).await
    } else {
        tracing::debug!(target: "game.session", token = %token, "unrecognized game token");
        util::ack(&bot, &q.id).await;
        Ok(())
    }
}

/// Start a game against the house in this chat, replacing any game the
/// presser already had. The board goes out as a fresh message so an old
/// finished board stays readable above it.
async fn start_solo(
    bot: &Bot,
    state: &AppState,
    q: &CallbackQuery,
    chat: ChatId,
) -> ResponseResult<()> {
    let user = q.from.id;
    let can_start = { state.fairness.write().await.can_start_game(user) };
    if !can_start {
        util::toast(bot, &q.id, LIMIT_REACHED).await;
        return Ok(());
    }
    util::ack(bot, &q.id).await;

    let board = Board::new();
    let sent = bot
        .send_message(chat, ui::solo_intro_text())
        .parse_mode(ParseMode::Html)
        .reply_markup(ui::board_keyboard(&board))
        .await?;
    {
        let mut games = state.games.write().await;
        games.start_solo(SoloSession::new(user, chat, sent.id));
    }
    tracing::info!(target: "game.session", user_id = user.0, "solo game started");
    Ok(())
}

/// Mint an invite and hand the creator a shareable deep link.
async fn create_invite(
    bot: &Bot,
    state: &AppState,
    q: &CallbackQuery,
    me: &Me,
    chat: ChatId,
) -> ResponseResult<()> {
    let user = q.from.id;
    let can_start = { state.fairness.write().await.can_start_game(user) };
    if !can_start {
        util::toast(bot, &q.id, LIMIT_REACHED).await;
        return Ok(());
    }

    let invite_id = {
        let mut games = state.games.write().await;
        let mut rng = rand::rng();
        games.create_invite(user, q.from.full_name(), chat, &mut rng)
    };
    util::ack(bot, &q.id).await;

    let link = format!(
        "https://t.me/{}?start={}{invite_id}",
        me.username(),
        ids::DEEP_LINK_PREFIX
    );
    bot.send_message(chat, ui::invite_text(&link)).await?;
    tracing::info!(target: "game.session", user_id = user.0, invite = %invite_id, "invite created");
    Ok(())
}

/// Route a `move_<cell>` press to whichever session the presser is in.
async fn apply_move(
    bot: &Bot,
    state: &AppState,
    q: &CallbackQuery,
    cell: usize,
) -> ResponseResult<()> {
    let user = q.from.id;
    let key = { state.games.read().await.session_key(user).cloned() };
    match key {
        None => {
            util::toast(bot, &q.id, "No active game. Send /tictactoe to start one.").await;
            Ok(())
        }
        Some(SessionKey::Solo(chat)) => solo_move(bot, state, q, user, chat, cell).await,
        Some(SessionKey::Paired(id)) => paired_move(bot, state, q, user, &id, cell).await,
    }
}

/// Snapshot taken under the game lock; rendering and fairness bookkeeping
/// happen after the lock is dropped.
enum SoloStep {
    Missing,
    Rejected(MoveError),
    Ongoing { board: Board, message: MessageId },
    Won { board: Board, message: MessageId },
    Lost { board: Board, message: MessageId },
    Drawn { board: Board, message: MessageId },
}

async fn solo_move(
    bot: &Bot,
    state: &AppState,
    q: &CallbackQuery,
    user: UserId,
    chat: ChatId,
    cell: usize,
) -> ResponseResult<()> {
    // The opponent's posture is decided per move: while a win could still
    // pay out a promo the house contests, otherwise it plays to lose.
    let strategy = {
        let mut fairness = state.fairness.write().await;
        OpponentStrategy::for_verdict(fairness.can_award_promo(user))
    };

    let step = {
        let mut games = state.games.write().await;
        match games.solo_mut(chat) {
            None => SoloStep::Missing,
            Some(session) => {
                let result = {
                    let mut rng = rand::rng();
                    session.play_turn(cell, strategy, &mut rng)
                };
                let board = session.board.clone();
                let message = session.message;
                match result {
                    Err(error) => SoloStep::Rejected(error),
                    Ok(SoloOutcome::Continue) => SoloStep::Ongoing { board, message },
                    Ok(SoloOutcome::HumanWin) => {
                        games.remove_solo(chat);
                        SoloStep::Won { board, message }
                    }
                    Ok(SoloOutcome::OpponentWin) => {
                        games.remove_solo(chat);
                        SoloStep::Lost { board, message }
                    }
                    Ok(SoloOutcome::Draw) => {
                        games.remove_solo(chat);
                        SoloStep::Drawn { board, message }
                    }
                }
            }
        }
    };

    match step {
        SoloStep::Missing => {
            util::toast(bot, &q.id, "That game has already ended.").await;
        }
        SoloStep::Rejected(MoveError::Occupied) => {
            util::toast(bot, &q.id, "That square is taken.").await;
        }
        SoloStep::Rejected(MoveError::NotYourTurn { holder }) => {
            util::toast(bot, &q.id, &format!("It's {holder}'s turn.")).await;
        }
        SoloStep::Ongoing { board, message } => {
            util::ack(bot, &q.id).await;
            util::edit_text(
                bot,
                chat,
                message,
                ui::solo_turn_text(),
                Some(ui::board_keyboard(&board)),
            )
            .await;
        }
        SoloStep::Won { board, message } => {
            util::ack(bot, &q.id).await;
            { state.fairness.write().await.record_game(user) };
            let code = award_promo(state, user).await;
            tracing::info!(target: "game.session", user_id = user.0, "solo game won");
            util::edit_text(
                bot,
                chat,
                message,
                &ui::solo_win_text(code.as_deref()),
                Some(ui::finished_solo_keyboard(&board)),
            )
            .await;
        }
        SoloStep::Lost { board, message } => {
            util::ack(bot, &q.id).await;
            { state.fairness.write().await.record_game(user) };
            tracing::info!(target: "game.session", user_id = user.0, "solo game lost");
            util::edit_text(
                bot,
                chat,
                message,
                ui::solo_loss_text(),
                Some(ui::finished_solo_keyboard(&board)),
            )
            .await;
        }
        SoloStep::Drawn { board, message } => {
            util::ack(bot, &q.id).await;
            { state.fairness.write().await.record_game(user) };
            tracing::info!(target: "game.session", user_id = user.0, "solo game drawn");
            util::edit_text(
                bot,
                chat,
                message,
                ui::draw_text(),
                Some(ui::finished_solo_keyboard(&board)),
            )
            .await;
        }
    }
    Ok(())
}

enum PairStep {
    Missing,
    Rejected(MoveError),
    Ongoing {
        board: Board,
        turn: Mark,
        x: Participant,
        o: Participant,
    },
    Won {
        winner: Mark,
        board: Board,
        x: Participant,
        o: Participant,
    },
    Drawn {
        board: Board,
        x: Participant,
        o: Participant,
    },
}

async fn paired_move(
    bot: &Bot,
    state: &AppState,
    q: &CallbackQuery,
    user: UserId,
    game_id: &str,
    cell: usize,
) -> ResponseResult<()> {
    let step = {
        let mut games = state.games.write().await;
        match games.paired_mut(game_id) {
            None => PairStep::Missing,
            Some(session) => {
                let result = session.apply_move(user, cell);
                let (board, turn) = (session.board.clone(), session.turn);
                let (x, o) = (session.x.clone(), session.o.clone());
                match result {
                    Err(error) => PairStep::Rejected(error),
                    Ok(PairedOutcome::Continue) => PairStep::Ongoing { board, turn, x, o },
                    Ok(PairedOutcome::Win(winner)) => {
                        games.remove_paired(game_id);
                        PairStep::Won { winner, board, x, o }
                    }
                    Ok(PairedOutcome::Draw) => {
                        games.remove_paired(game_id);
                        PairStep::Drawn { board, x, o }
                    }
                }
            }
        }
    };

    match step {
        PairStep::Missing => {
            util::toast(bot, &q.id, "That game has already ended.").await;
        }
        PairStep::Rejected(MoveError::Occupied) => {
            util::toast(bot, &q.id, "That square is taken.").await;
        }
        PairStep::Rejected(MoveError::NotYourTurn { holder }) => {
            util::toast(bot, &q.id, &format!("It's {holder}'s turn.")).await;
        }
        PairStep::Ongoing { board, turn, x, o } => {
            util::ack(bot, &q.id).await;
            let header = ui::duel_header(&x.name, &o.name);
            let markup = ui::board_keyboard(&board);
            let (active, waiting) = match turn {
                Mark::X => (&x, &o),
                Mark::O => (&o, &x),
            };
            let active_text = format!("{header}\n\n{}", ui::your_move_line());
            let waiting_text = format!("{header}\n\n{}", ui::waiting_line(&active.name));
            util::edit_text(
                bot,
                active.chat,
                active.message,
                &active_text,
                Some(markup.clone()),
            )
            .await;
            util::edit_text(bot, waiting.chat, waiting.message, &waiting_text, Some(markup)).await;
        }
        PairStep::Won { winner, board, x, o } => {
            util::ack(bot, &q.id).await;
            let winner_side = match winner {
                Mark::X => &x,
                Mark::O => &o,
            };
            tracing::info!(target: "game.session", game = %game_id, winner = %winner_side.name, "paired game won");
            close_paired(bot, state, &board, &x, &o, &ui::duel_win_line(&winner_side.name)).await;
            // Only a creator (X) win can pay out, against the creator's own
            // promo budget; a joiner win never mints a code.
            if winner == Mark::X
                && let Some(code) = award_promo(state, x.user).await
            {
                let sent = bot
                    .send_message(x.chat, ui::duel_promo_text(&code))
                    .parse_mode(ParseMode::Html)
                    .await;
                if let Err(error) = sent {
                    tracing::warn!(target: "game.session", ?error, "promo delivery failed");
                }
            }
        }
        PairStep::Drawn { board, x, o } => {
            util::ack(bot, &q.id).await;
            tracing::info!(target: "game.session", game = %game_id, "paired game drawn");
            close_paired(bot, state, &board, &x, &o, ui::draw_text()).await;
        }
    }
    Ok(())
}

/// Terminal bookkeeping for a two-player game: both completions count, and
/// both sides see the same outcome line over the frozen board.
async fn close_paired(
    bot: &Bot,
    state: &AppState,
    board: &Board,
    x: &Participant,
    o: &Participant,
    outcome_line: &str,
) {
    {
        let mut fairness = state.fairness.write().await;
        fairness.record_game(x.user);
        fairness.record_game(o.user);
    }
    let text = format!("{}\n\n{outcome_line}", ui::duel_header(&x.name, &o.name));
    let markup = ui::board_keyboard(board);
    util::edit_text(bot, x.chat, x.message, &text, Some(markup.clone())).await;
    util::edit_text(bot, o.chat, o.message, &text, Some(markup)).await;
}

/// Burn promo budget and mint a code, or report that the quota is spent.
async fn award_promo(state: &AppState, user: UserId) -> Option<String> {
    let eligible = {
        let mut fairness = state.fairness.write().await;
        let eligible = fairness.can_award_promo(user);
        if eligible {
            fairness.record_promo(user);
        }
        eligible
    };
    if !eligible {
        tracing::info!(target: "game.fairness", user_id = user.0, "win past promo quota, no code issued");
        return None;
    }
    let code = {
        let mut promos = state.promos.write().await;
        let mut rng = rand::rng();
        promos.issue(&mut rng)
    };
    tracing::info!(target: "game.fairness", user_id = user.0, "promo code issued");
    Some(code)
}

/// Promote a pending invite into a live paired game. Reached through
/// `/start ttt_<id>`, so the joiner's chat is wherever they opened the link.
pub async fn join_game(
    bot: &Bot,
    state: &AppState,
    joiner: &User,
    joiner_chat: ChatId,
    invite_id: &str,
) -> ResponseResult<()> {
    let can_start = { state.fairness.write().await.can_start_game(joiner.id) };
    if !can_start {
        bot.send_message(joiner_chat, LIMIT_REACHED).await?;
        return Ok(());
    }

    let claimed = { state.games.write().await.claim_invite(invite_id, joiner.id) };
    let invite = match claimed {
        Ok(invite) => invite,
        Err(JoinError::Unknown) => {
            bot.send_message(
                joiner_chat,
                "That invite link has expired or was already used.",
            )
            .await?;
            return Ok(());
        }
        Err(JoinError::SelfJoin) => {
            bot.send_message(
                joiner_chat,
                "You can't play against yourself. Share the link with a friend.",
            )
            .await?;
            return Ok(());
        }
    };

    let board = Board::new();
    let joiner_name = joiner.full_name();
    let header = ui::duel_header(&invite.creator_name, &joiner_name);
    let markup = ui::board_keyboard(&board);
    let creator_text = format!("{header}\n\n{}", ui::your_move_line());
    let joiner_text = format!("{header}\n\n{}", ui::waiting_line(&invite.creator_name));

    // Both sides need a live board message before the session exists. If
    // either send fails the invite goes back, so the link keeps working.
    let creator_message = match bot
        .send_message(invite.chat, creator_text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup.clone())
        .await
    {
        Ok(message) => message.id,
        Err(error) => {
            tracing::warn!(target: "game.session", invite = %invite.id, ?error, "couldn't reach the invite creator");
            { state.games.write().await.restore_invite(invite) };
            bot.send_message(joiner_chat, "Couldn't start the game. Try again in a moment.")
                .await?;
            return Ok(());
        }
    };
    let joiner_message = match bot
        .send_message(joiner_chat, joiner_text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup)
        .await
    {
        Ok(message) => message.id,
        Err(error) => {
            tracing::warn!(target: "game.session", invite = %invite.id, ?error, "couldn't reach the joiner");
            { state.games.write().await.restore_invite(invite) };
            return Ok(());
        }
    };

    let game_id = invite.id.clone();
    let session = PairedSession {
        id: invite.id,
        board,
        x: Participant {
            user: invite.creator,
            name: invite.creator_name,
            chat: invite.chat,
            message: creator_message,
        },
        o: Participant {
            user: joiner.id,
            name: joiner_name,
            chat: joiner_chat,
            message: joiner_message,
        },
        turn: Mark::X,
    };
    {
        let mut games = state.games.write().await;
        games.insert_paired(session);
    }
    tracing::info!(target: "game.session", game = %game_id, "paired game started");
    Ok(())
}
