mod invoke;
