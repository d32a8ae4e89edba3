mod quiz;

use dotenv::dotenv;
use quiz::geography;
use quiz::{GameSession, SessionStatus, Step};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatId, InputFile, KeyboardButton, KeyboardMarkup},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Playing {
        session: GameSession,
    },
}

type SessionStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    dotenv().expect("Failed to load .env file");

    pretty_env_logger::init();
    log::info!("Starting geography quiz bot...");

    let bot = Bot::from_env();

    log::info!("Opening the session storage...");
    let storage: SessionStorage = SqliteStorage::open("db.sqlite", Json)
        .await
        .expect("Failed to open db.sqlite")
        .erase();
    log::info!("Session storage ready");

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Playing { session }].endpoint(play)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Welcome to the geography quiz! I will show you a photo of a famous site and you pick the country it belongs to. Ten questions -- let's go!";
const QUESTION_PROMPT: &str = "Which country is this site in?";
const NEXT_BUTTON: &str = "Next";
const NEW_GAME_BUTTON: &str = "New game";

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;
    start_new_game(&bot, &dialogue, msg.chat.id).await
}

async fn start_new_game(bot: &Bot, dialogue: &QuizDialogue, chat_id: ChatId) -> HandlerResult {
    let session = geography::new_session(&mut rand::thread_rng());
    log::debug!("New session started for chat {}", chat_id);

    send_question(bot, chat_id, &session).await?;
    // Overwrites whatever snapshot a previous session left behind
    dialogue.update(State::Playing { session }).await?;
    Ok(())
}

async fn play(
    bot: Bot,
    dialogue: QuizDialogue,
    session: GameSession,
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please use the buttons below")
                .await?;
            return Ok(());
        }
    };

    if text == NEW_GAME_BUTTON || text == "/start" {
        return start_new_game(&bot, &dialogue, msg.chat.id).await;
    }

    match session.status {
        SessionStatus::AwaitingAnswer => {
            receive_answer(&bot, &dialogue, session, msg.chat.id, text).await
        }
        SessionStatus::AwaitingNext => {
            receive_next(&bot, &dialogue, session, msg.chat.id, text).await
        }
        // A finished session is normally erased right away; if one still
        // turns up, show its summary and erase it now.
        SessionStatus::Complete => {
            send_summary(&bot, msg.chat.id, &session.summary()).await?;
            dialogue.exit().await?;
            Ok(())
        }
    }
}

async fn receive_answer(
    bot: &Bot,
    dialogue: &QuizDialogue,
    mut session: GameSession,
    chat_id: ChatId,
    text: &str,
) -> HandlerResult {
    let is_option = match session.current_question() {
        Some(question) => question.has_option(text),
        None => false,
    };
    if !is_option {
        bot.send_message(chat_id, "Please answer with one of the four options")
            .await?;
        send_question(bot, chat_id, &session).await?;
        return Ok(());
    }

    match session.submit(text) {
        Some(feedback) => {
            let reply = if feedback.correct {
                String::from("Correct! Well done!")
            } else {
                format!("Incorrect! The correct answer is {}.", feedback.correct_answer)
            };
            bot.send_message(chat_id, reply)
                .reply_markup(next_keyboard())
                .await?;

            dialogue.update(State::Playing { session }).await?;
        }
        None => {
            send_question(bot, chat_id, &session).await?;
        }
    }
    Ok(())
}

async fn receive_next(
    bot: &Bot,
    dialogue: &QuizDialogue,
    mut session: GameSession,
    chat_id: ChatId,
    text: &str,
) -> HandlerResult {
    if text != NEXT_BUTTON {
        bot.send_message(chat_id, "Press Next when you are ready to continue")
            .reply_markup(next_keyboard())
            .await?;
        return Ok(());
    }

    match session.advance() {
        Step::NextQuestion => {
            send_question(bot, chat_id, &session).await?;
            dialogue.update(State::Playing { session }).await?;
        }
        Step::Finished(summary) => {
            log::debug!("Session finished for chat {}: {}", chat_id, summary.score_text());

            send_summary(bot, chat_id, &summary).await?;
            // A finished session is never resumed
            dialogue.exit().await?;
        }
    }
    Ok(())
}

async fn send_summary(bot: &Bot, chat_id: ChatId, summary: &quiz::Summary) -> HandlerResult {
    let summary_text = format!("{}\n{}", summary.message(), summary.score_text());
    bot.send_message(chat_id, summary_text)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(
            NEW_GAME_BUTTON,
        )]]))
        .await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &GameSession) -> HandlerResult {
    let question = match session.current_question() {
        Some(question) => question,
        None => return Ok(()),
    };

    let caption = format!(
        "{}\n{}\n\n{}",
        session.progress_line(),
        session.score_line(),
        QUESTION_PROMPT
    );

    bot.send_photo(
        chat_id,
        InputFile::file(geography::image_path(&question.subject)),
    )
    .caption(caption)
    .reply_markup(options_keyboard(&question.options))
    .await?;
    Ok(())
}

fn options_keyboard(options: &[String]) -> KeyboardMarkup {
    let rows = options
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|option| KeyboardButton::new(option.clone()))
                .collect()
        })
        .collect::<Vec<Vec<KeyboardButton>>>();
    KeyboardMarkup::new(rows)
}

fn next_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(NEXT_BUTTON)]])
}
