mod cors;
mod health;
mod new_game;
mod scores;
