pub mod mpv;
