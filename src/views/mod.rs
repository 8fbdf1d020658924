mod widget;
