mod credential;
mod token;
