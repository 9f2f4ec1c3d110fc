use clock_core::{LocalClock, Moment};

/// Local time from the browser's `Date`.
pub struct BrowserClock;

fn moment_of(date: &js_sys::Date) -> Moment {
    Moment {
        epoch_ms: date.get_time() as i64,
        hour: date.get_hours(),
        minute: date.get_minutes(),
        second: date.get_seconds(),
    }
}

impl LocalClock for BrowserClock {
    fn now(&self) -> Moment {
        moment_of(&js_sys::Date::new_0())
    }

    fn today_at(&self, hour: u32, minute: u32, second: u32) -> Moment {
        let date = js_sys::Date::new_0();
        date.set_hours(hour);
        date.set_minutes(minute);
        date.set_seconds(second);
        date.set_milliseconds(0);
        moment_of(&date)
    }
}
