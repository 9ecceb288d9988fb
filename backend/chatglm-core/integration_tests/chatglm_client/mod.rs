mod construction;
mod helpers;
mod invoke;
mod task;
