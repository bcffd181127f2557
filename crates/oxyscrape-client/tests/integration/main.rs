mod common;
mod jobs;
mod realtime;
