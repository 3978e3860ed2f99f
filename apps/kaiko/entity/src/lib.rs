pub mod chat;
pub mod chat_participant;
pub mod friendship;
pub mod game;
pub mod game_session;
pub mod game_session_player;
pub mod message;
pub mod user;

pub use chat::Model as Chat;
pub use chat_participant::Model as ChatParticipant;
pub use friendship::Model as Friendship;
pub use game::Model as Game;
pub use game_session::Model as GameSession;
pub use game_session_player::Model as GameSessionPlayer;
pub use message::Model as Message;
pub use user::Model as User;
