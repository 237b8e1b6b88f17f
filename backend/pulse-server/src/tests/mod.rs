mod control;
mod noise_source;
