pub mod configuration;

pub mod date {
    pub mod holidaydate;
}

pub mod holiday {
    pub mod holidayid;
    pub mod holidayquery;
    pub mod holidayengine;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod names {
    pub mod namedatasource;
    pub mod namedictionarycache;
}

pub mod objectwithuuid;

pub mod resolver {
    pub mod strategyregistry;
    pub mod fallbackmatcher;
}

pub mod time {
    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod weekendadjustment;
        pub mod fixeddateholiday;
        pub mod nthweekdayholiday;
        pub mod lastweekdayholiday;
        pub mod easterrelatedholiday;
    }

    pub mod calendar {
        pub mod occurrence;
        pub mod holidaycalendar;
        pub mod simplecalendar;
        pub mod jointcalendar;
        pub mod holidaycalendarmanager;
    }
}
